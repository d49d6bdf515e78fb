use std::fmt;

use crate::status::JobStatus;

use super::state::BoardState;

/// Plain-text view of the board: stats line, then each column's current page
pub struct BoardView<'a>(pub &'a BoardState);

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0;
        let stats: Vec<String> = board
            .status_counts()
            .into_iter()
            .map(|(status, count)| format!("{}: {}", status, count))
            .collect();
        writeln!(f, "{}", stats.join(" | "))?;

        for status in JobStatus::ALL {
            let column = board.derive_column(status);
            writeln!(
                f,
                "\n== {} ({}) page {}/{}",
                status,
                column.total_count,
                column.page,
                column.total_pages.max(1)
            )?;
            if column.jobs.is_empty() {
                writeln!(f, "  (empty)")?;
            }
            for job in column.jobs {
                writeln!(
                    f,
                    "  [{}] {} - {} (applied {})",
                    job.id, job.company, job.role, job.date_applied
                )?;
            }
        }
        Ok(())
    }
}

pub fn render_board(board: &BoardState) -> String {
    BoardView(board).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::job;

    #[test]
    fn renders_counts_and_first_page() {
        let mut board = BoardState::new(2);
        board.replace_jobs(vec![
            job("a", JobStatus::Applied),
            job("b", JobStatus::Applied),
            job("c", JobStatus::Applied),
            job("o", JobStatus::OfferReceived),
        ]);

        let text = render_board(&board);
        assert!(text.starts_with("Applied: 3 | Interviewing: 0 | Offer Received: 1 | Rejected: 0"));
        assert!(text.contains("== Applied (3) page 1/2"));
        assert!(text.contains("[b] Company b - Engineer (applied 2024-01-15)"));
        assert!(!text.contains("[c]"));
        assert!(text.contains("== Rejected (0) page 1/1\n  (empty)"));
    }
}
