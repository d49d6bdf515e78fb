use tracing::debug;

use crate::api::job::Job;
use crate::client::{ClientError, JobsApi};
use crate::status::JobStatus;

use super::state::{BoardState, CommitOutcome};

/// What the pointer is over
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// A column header or empty column area
    Column(JobStatus),
    /// Another card, by job id
    Job(String),
}

#[derive(Debug, Clone, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Holds the job as it looked when the drag started, for the overlay
    Dragging { snapshot: Job },
}

/// How a drag ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// No drag was in progress
    NotDragging,
    /// Dropped with no valid target; optimistic status was reverted
    Abandoned,
    Committed(CommitOutcome),
}

/// Resolved target: the status it selects and, for cards, its board index
enum Resolved {
    Onto(JobStatus, Option<usize>),
    Itself,
    Nothing,
}

/// Drives a [`BoardState`] from pointer drag events
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Snapshot of the job being dragged
    pub fn active(&self) -> Option<&Job> {
        match &self.state {
            DragState::Dragging { snapshot } => Some(snapshot),
            DragState::Idle => None,
        }
    }

    /// Begin dragging `job_id`; unknown ids leave the controller idle.
    /// A drag still in progress is cancelled first.
    pub fn drag_start(&mut self, board: &mut BoardState, job_id: &str) -> Option<&Job> {
        if self.drag_cancel(board) {
            debug!("Drag of {} started while another drag was active", job_id);
        }
        self.state = match board.job(job_id) {
            Some(job) => DragState::Dragging {
                snapshot: job.clone(),
            },
            None => DragState::Idle,
        };
        self.active()
    }

    fn resolve(board: &BoardState, active_id: &str, target: Option<&DropTarget>) -> Resolved {
        match target {
            None => Resolved::Nothing,
            Some(DropTarget::Column(status)) => Resolved::Onto(*status, None),
            Some(DropTarget::Job(id)) if id == active_id => Resolved::Itself,
            Some(DropTarget::Job(id)) => match (board.job(id), board.index_of(id)) {
                (Some(over), Some(index)) => Resolved::Onto(over.status, Some(index)),
                _ => Resolved::Nothing,
            },
        }
    }

    /// Hovering: move the active job into the hovered column locally.
    /// Returns whether the board changed.
    pub fn drag_over(&mut self, board: &mut BoardState, target: Option<&DropTarget>) -> bool {
        let Some(active_id) = self.active().map(|job| job.id.clone()) else {
            return false;
        };
        match Self::resolve(board, &active_id, target) {
            Resolved::Onto(status, _) => board.apply_optimistic_status_change(&active_id, status),
            Resolved::Itself | Resolved::Nothing => false,
        }
    }

    /// Drop: return to idle, then settle the move against the server
    pub async fn drag_end<A: JobsApi + ?Sized>(
        &mut self,
        board: &mut BoardState,
        api: &A,
        target: Option<&DropTarget>,
    ) -> Result<DragOutcome, ClientError> {
        let snapshot = match std::mem::take(&mut self.state) {
            DragState::Dragging { snapshot } => snapshot,
            DragState::Idle => return Ok(DragOutcome::NotDragging),
        };
        let id = snapshot.id.as_str();

        let (status, position) = match Self::resolve(board, id, target) {
            Resolved::Onto(status, position) => (status, position),
            Resolved::Itself => match board.job(id) {
                Some(current) => (current.status, None),
                None => return Ok(DragOutcome::Committed(CommitOutcome::UnknownJob)),
            },
            Resolved::Nothing => {
                debug!("Drag of {} ended without a target", id);
                board.revert_optimistic(id);
                return Ok(DragOutcome::Abandoned);
            }
        };

        board
            .commit_drag(api, id, status, position)
            .await
            .map(DragOutcome::Committed)
    }

    /// Abort the drag and put the job back where the server has it
    pub fn drag_cancel(&mut self, board: &mut BoardState) -> bool {
        match std::mem::take(&mut self.state) {
            DragState::Dragging { snapshot } => {
                board.revert_optimistic(&snapshot.id);
                true
            }
            DragState::Idle => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::{job, FakeJobsApi};

    async fn setup() -> (FakeJobsApi, BoardState, DragController) {
        let api = FakeJobsApi::with_jobs(vec![
            job("a", JobStatus::Applied),
            job("b", JobStatus::Applied),
            job("i", JobStatus::Interviewing),
        ]);
        let mut board = BoardState::default();
        board.load(&api).await.unwrap();
        (api, board, DragController::new())
    }

    fn status(board: &BoardState, id: &str) -> JobStatus {
        board.job(id).unwrap().status
    }

    #[tokio::test]
    async fn drag_across_columns_commits_once() {
        let (api, mut board, mut drag) = setup().await;

        let snapshot = drag.drag_start(&mut board, "a").cloned().unwrap();
        assert_eq!(snapshot.status, JobStatus::Applied);

        let over = DropTarget::Column(JobStatus::Interviewing);
        assert!(drag.drag_over(&mut board, Some(&over)));
        assert_eq!(status(&board, "a"), JobStatus::Interviewing);
        assert_eq!(api.update_calls(), 0);

        let outcome = drag.drag_end(&mut board, &api, Some(&over)).await.unwrap();
        assert_eq!(
            outcome,
            DragOutcome::Committed(CommitOutcome::Settled { persisted: true, reordered: false })
        );
        assert_eq!(api.update_calls(), 1);
        assert_eq!(api.server_status("a"), Some(JobStatus::Interviewing));
        assert!(drag.active().is_none());
    }

    #[tokio::test]
    async fn dropping_onto_a_card_takes_its_status_and_position() {
        let (api, mut board, mut drag) = setup().await;

        drag.drag_start(&mut board, "a");
        let over = DropTarget::Job("i".into());
        drag.drag_over(&mut board, Some(&over));
        assert_eq!(status(&board, "a"), JobStatus::Interviewing);

        let outcome = drag.drag_end(&mut board, &api, Some(&over)).await.unwrap();
        assert_eq!(
            outcome,
            DragOutcome::Committed(CommitOutcome::Settled { persisted: true, reordered: true })
        );
        let order: Vec<&str> = board.jobs().iter().map(|j| j.id.as_str()).collect();
        assert_eq!(order, vec!["b", "i", "a"]);
    }

    #[tokio::test]
    async fn dragging_back_before_drop_makes_no_calls() {
        let (api, mut board, mut drag) = setup().await;

        drag.drag_start(&mut board, "a");
        drag.drag_over(&mut board, Some(&DropTarget::Column(JobStatus::Rejected)));
        drag.drag_over(&mut board, Some(&DropTarget::Job("b".into())));
        assert_eq!(status(&board, "a"), JobStatus::Applied);

        let over = DropTarget::Column(JobStatus::Applied);
        let outcome = drag.drag_end(&mut board, &api, Some(&over)).await.unwrap();
        assert_eq!(
            outcome,
            DragOutcome::Committed(CommitOutcome::Settled { persisted: false, reordered: false })
        );
        assert_eq!(api.update_calls(), 0);
    }

    #[tokio::test]
    async fn hovering_itself_is_a_no_op() {
        let (api, mut board, mut drag) = setup().await;

        drag.drag_start(&mut board, "b");
        let itself = DropTarget::Job("b".into());
        assert!(!drag.drag_over(&mut board, Some(&itself)));

        let outcome = drag.drag_end(&mut board, &api, Some(&itself)).await.unwrap();
        assert_eq!(
            outcome,
            DragOutcome::Committed(CommitOutcome::Settled { persisted: false, reordered: false })
        );
        assert_eq!(api.update_calls(), 0);
        assert_eq!(board.index_of("b"), Some(1));
    }

    #[tokio::test]
    async fn lost_target_abandons_and_reverts() {
        let (api, mut board, mut drag) = setup().await;

        drag.drag_start(&mut board, "a");
        drag.drag_over(&mut board, Some(&DropTarget::Column(JobStatus::Rejected)));
        assert_eq!(status(&board, "a"), JobStatus::Rejected);

        let vanished = DropTarget::Job("deleted-meanwhile".into());
        assert!(!drag.drag_over(&mut board, Some(&vanished)));

        let outcome = drag.drag_end(&mut board, &api, Some(&vanished)).await.unwrap();
        assert_eq!(outcome, DragOutcome::Abandoned);
        assert_eq!(status(&board, "a"), JobStatus::Applied);
        assert_eq!(api.update_calls(), 0);

        let outcome = drag.drag_end(&mut board, &api, None).await.unwrap();
        assert_eq!(outcome, DragOutcome::NotDragging);
    }

    #[tokio::test]
    async fn cancel_restores_persisted_status() {
        let (api, mut board, mut drag) = setup().await;

        drag.drag_start(&mut board, "i");
        drag.drag_over(&mut board, Some(&DropTarget::Column(JobStatus::OfferReceived)));
        assert!(drag.drag_cancel(&mut board));

        assert_eq!(status(&board, "i"), JobStatus::Interviewing);
        assert!(drag.active().is_none());
        assert!(!drag.drag_cancel(&mut board));
        assert_eq!(api.update_calls(), 0);
    }

    #[tokio::test]
    async fn failed_drop_resyncs_the_board() {
        let (api, mut board, mut drag) = setup().await;
        api.fail_writes(true);

        drag.drag_start(&mut board, "b");
        let over = DropTarget::Column(JobStatus::Rejected);
        drag.drag_over(&mut board, Some(&over));
        let outcome = drag.drag_end(&mut board, &api, Some(&over)).await.unwrap();

        assert_eq!(outcome, DragOutcome::Committed(CommitOutcome::Resynced));
        assert_eq!(status(&board, "b"), JobStatus::Applied);
        assert_eq!(api.list_calls(), 2);
    }

    #[test]
    fn unknown_job_does_not_start_a_drag() {
        let mut board = BoardState::default();
        let mut drag = DragController::new();
        assert!(drag.drag_start(&mut board, "nope").is_none());
        assert!(matches!(drag.state(), DragState::Idle));
    }

    #[tokio::test]
    async fn restarting_a_drag_reverts_the_abandoned_one() {
        let (api, mut board, mut drag) = setup().await;

        drag.drag_start(&mut board, "a");
        drag.drag_over(&mut board, Some(&DropTarget::Column(JobStatus::Rejected)));
        assert_eq!(status(&board, "a"), JobStatus::Rejected);

        drag.drag_start(&mut board, "b");
        assert_eq!(status(&board, "a"), JobStatus::Applied);

        let over = DropTarget::Column(JobStatus::Applied);
        drag.drag_end(&mut board, &api, Some(&over)).await.unwrap();
        assert_eq!(status(&board, "a"), JobStatus::Applied);
        assert_eq!(api.server_status("a"), Some(JobStatus::Applied));
        assert_eq!(api.update_calls(), 0);
    }

    #[tokio::test]
    async fn restarting_with_an_unknown_job_still_reverts() {
        let (api, mut board, mut drag) = setup().await;

        drag.drag_start(&mut board, "i");
        drag.drag_over(&mut board, Some(&DropTarget::Column(JobStatus::OfferReceived)));

        assert!(drag.drag_start(&mut board, "gone").is_none());
        assert!(matches!(drag.state(), DragState::Idle));
        assert_eq!(status(&board, "i"), JobStatus::Interviewing);
        assert_eq!(api.update_calls(), 0);
    }
}
