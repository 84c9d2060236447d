use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("plan {0} not found")]
    PlanNotFound(Uuid),

    #[error("photo {0} not found")]
    PhotoNotFound(Uuid),

    #[error("project {0} has no active plan")]
    NoActivePlan(Uuid),

    #[error("cannot delete the only plan of project {0}")]
    LastPlan(Uuid),

    #[error("plan {0} is active; designate another plan active before deleting it")]
    PlanIsActive(Uuid),

    #[error("backend: {0}")]
    Backend(String),

    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),

    #[error("project file: {0}")]
    Format(#[from] serde_json::Error),
}
