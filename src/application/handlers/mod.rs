//! Application command and query handlers.
//!
//! One handler per operation of the consultation flow. Handlers
//! orchestrate ports and delegate every policy decision to the domain.

mod abandon_consultation;
mod answer_question;
mod generate_report;
mod get_consultation_view;
mod go_back;
mod list_pathways;
mod restart_consultation;
mod start_consultation;

pub use abandon_consultation::{
    AbandonConsultationCommand, AbandonConsultationError, AbandonConsultationHandler,
};
pub use answer_question::{
    AnswerQuestionCommand, AnswerQuestionError, AnswerQuestionHandler, AnswerQuestionResult,
    ChoiceSelector,
};
pub use generate_report::{
    GenerateReportError, GenerateReportHandler, GenerateReportQuery, GeneratedReport,
};
pub use get_consultation_view::{
    GetConsultationViewError, GetConsultationViewHandler, GetConsultationViewQuery,
};
pub use go_back::{GoBackCommand, GoBackError, GoBackHandler, GoBackResult};
pub use list_pathways::{ListPathwaysError, ListPathwaysHandler};
pub use restart_consultation::{
    RestartConsultationCommand, RestartConsultationError, RestartConsultationHandler,
    RestartConsultationResult,
};
pub use start_consultation::{
    StartConsultationCommand, StartConsultationError, StartConsultationHandler,
    StartConsultationResult,
};
