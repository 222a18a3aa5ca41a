use std::sync::Arc;

use tokio::sync::watch;
use tracing::warn;

use super::{Reducer, Store};
use crate::matching::{CandidateGapReport, MatchingService, VacancyOverview};
use crate::session::Session;
use crate::talent::{ProfileId, TalentDirectory, VacancyId};

/// Snapshot of the vacancy detail screen.
#[derive(Debug, Clone, PartialEq)]
pub struct VacancyBoardState {
    pub session: Session,
    pub phase: BoardPhase,
    pub overview: Option<VacancyOverview>,
    pub selected: Option<CandidateGapReport>,
}

impl VacancyBoardState {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            phase: BoardPhase::Idle,
            overview: None,
            selected: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardPhase {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone)]
pub enum BoardCommand {
    LoadStarted,
    OverviewLoaded(VacancyOverview),
    CandidateOpened(CandidateGapReport),
    CandidateClosed,
    LoadFailed(String),
}

pub struct VacancyBoard;

impl Reducer for VacancyBoard {
    type State = VacancyBoardState;
    type Command = BoardCommand;

    fn reduce(&self, state: &VacancyBoardState, command: BoardCommand) -> VacancyBoardState {
        let mut next = state.clone();
        match command {
            BoardCommand::LoadStarted => {
                next.phase = BoardPhase::Loading;
            }
            BoardCommand::OverviewLoaded(overview) => {
                next.phase = BoardPhase::Ready;
                next.overview = Some(overview);
                next.selected = None;
            }
            BoardCommand::CandidateOpened(report) => {
                next.phase = BoardPhase::Ready;
                next.selected = Some(report);
            }
            BoardCommand::CandidateClosed => {
                next.selected = None;
            }
            BoardCommand::LoadFailed(message) => {
                next.phase = BoardPhase::Failed(message);
            }
        }
        next
    }
}

/// Drives the vacancy board: fetches through the matching service and dispatches
/// the outcome so subscribers see loading, ready and failure snapshots in order.
pub struct VacancyBoardController<D> {
    service: Arc<MatchingService<D>>,
    store: Store<VacancyBoard>,
}

impl<D> VacancyBoardController<D>
where
    D: TalentDirectory + 'static,
{
    pub fn new(service: Arc<MatchingService<D>>, session: Session) -> Self {
        Self {
            service,
            store: Store::new(VacancyBoard, VacancyBoardState::new(session)),
        }
    }

    pub fn snapshot(&self) -> Arc<VacancyBoardState> {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<VacancyBoardState>> {
        self.store.subscribe()
    }

    pub fn open_vacancy(&self, vacancy_id: VacancyId) -> Arc<VacancyBoardState> {
        let session = self.store.dispatch(BoardCommand::LoadStarted).session.clone();

        match self.service.vacancy_overview(&session, vacancy_id) {
            Ok(overview) => self.store.dispatch(BoardCommand::OverviewLoaded(overview)),
            Err(error) => {
                warn!(%vacancy_id, %error, "vacancy board load failed");
                self.store
                    .dispatch(BoardCommand::LoadFailed(format!("could not load vacancy: {error}")))
            }
        }
    }

    pub fn open_candidate(
        &self,
        vacancy_id: VacancyId,
        profile_id: &ProfileId,
    ) -> Arc<VacancyBoardState> {
        let session = self.store.dispatch(BoardCommand::LoadStarted).session.clone();

        match self.service.candidate_gap(&session, vacancy_id, profile_id) {
            Ok(report) => self.store.dispatch(BoardCommand::CandidateOpened(report)),
            Err(error) => {
                warn!(%vacancy_id, %profile_id, %error, "candidate detail load failed");
                self.store.dispatch(BoardCommand::LoadFailed(format!(
                    "could not load candidate: {error}"
                )))
            }
        }
    }

    pub fn close_candidate(&self) -> Arc<VacancyBoardState> {
        self.store.dispatch(BoardCommand::CandidateClosed)
    }
}
