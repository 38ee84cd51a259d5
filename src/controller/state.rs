/// Lifecycle phase of a [`super::JobController`]
///
/// ```text
/// Idle --submit ok--> Polling --completed--> Done
///                     Polling --failed/poll error--> Failed
///                     Polling --cancel--> Idle
/// Done/Failed --new submit--> Polling (prior state discarded)
/// ```
///
/// `Done` and `Failed` are terminal per job: the poll loop has exited and
/// will never fetch that job id again. The job id is retained in `Done`
/// only so the download target can be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Polling {
        job_id: String,
    },
    Done {
        job_id: String,
        pdf_filename: Option<String>,
    },
    Failed,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Done { .. } | Phase::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_phases() {
        assert!(
            Phase::Done {
                job_id: "j".into(),
                pdf_filename: None
            }
            .is_terminal()
        );
        assert!(Phase::Failed.is_terminal());
        assert!(!Phase::Idle.is_terminal());
        assert!(!Phase::Polling { job_id: "j".into() }.is_terminal());
    }
}
