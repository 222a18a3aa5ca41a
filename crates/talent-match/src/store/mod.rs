//! Command-driven state store.
//!
//! A [`Store`] keeps the latest immutable snapshot of some screen state. Commands are
//! folded into a new snapshot by a [`Reducer`]; observers subscribe to a
//! `tokio::sync::watch` receiver and see every published snapshot.

mod vacancy_board;

pub use vacancy_board::{
    BoardCommand, BoardPhase, VacancyBoard, VacancyBoardController, VacancyBoardState,
};

use std::sync::Arc;

use tokio::sync::watch;

/// Pure transition from one snapshot to the next.
pub trait Reducer: Send + Sync + 'static {
    type State: Send + Sync + 'static;
    type Command;

    fn reduce(&self, state: &Self::State, command: Self::Command) -> Self::State;
}

pub struct Store<R: Reducer> {
    reducer: R,
    sender: watch::Sender<Arc<R::State>>,
}

impl<R: Reducer> Store<R> {
    pub fn new(reducer: R, initial: R::State) -> Self {
        let (sender, _receiver) = watch::channel(Arc::new(initial));
        Self { reducer, sender }
    }

    /// Apply a command and publish the resulting snapshot.
    pub fn dispatch(&self, command: R::Command) -> Arc<R::State> {
        let reducer = &self.reducer;
        // reduce under the channel lock so concurrent dispatches serialize
        self.sender.send_modify(|current| {
            *current = Arc::new(reducer.reduce(current, command));
        });
        self.snapshot()
    }

    pub fn snapshot(&self) -> Arc<R::State> {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<R::State>> {
        self.sender.subscribe()
    }
}
