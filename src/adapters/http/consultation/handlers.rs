//! HTTP handlers for consultation endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::adapters::http::error::{domain_error_response, error_response, ErrorResponse};
use crate::application::handlers::{
    AbandonConsultationCommand, AbandonConsultationError, AbandonConsultationHandler,
    AnswerQuestionCommand, AnswerQuestionError, AnswerQuestionHandler, ChoiceSelector,
    GenerateReportError, GenerateReportHandler, GenerateReportQuery, GetConsultationViewError,
    GetConsultationViewHandler, GetConsultationViewQuery, GoBackCommand, GoBackError,
    GoBackHandler, RestartConsultationCommand, RestartConsultationError,
    RestartConsultationHandler, StartConsultationCommand, StartConsultationError,
    StartConsultationHandler,
};
use crate::domain::foundation::{ConsultationId, PathwayId};

use super::dto::{AnswerRequest, ConsultationResponse, CreateConsultationRequest};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ConsultationHandlers {
    start_handler: Arc<StartConsultationHandler>,
    answer_handler: Arc<AnswerQuestionHandler>,
    back_handler: Arc<GoBackHandler>,
    restart_handler: Arc<RestartConsultationHandler>,
    view_handler: Arc<GetConsultationViewHandler>,
    report_handler: Arc<GenerateReportHandler>,
    abandon_handler: Arc<AbandonConsultationHandler>,
}

impl ConsultationHandlers {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        start_handler: Arc<StartConsultationHandler>,
        answer_handler: Arc<AnswerQuestionHandler>,
        back_handler: Arc<GoBackHandler>,
        restart_handler: Arc<RestartConsultationHandler>,
        view_handler: Arc<GetConsultationViewHandler>,
        report_handler: Arc<GenerateReportHandler>,
        abandon_handler: Arc<AbandonConsultationHandler>,
    ) -> Self {
        Self {
            start_handler,
            answer_handler,
            back_handler,
            restart_handler,
            view_handler,
            report_handler,
            abandon_handler,
        }
    }
}

fn parse_consultation_id(raw: &str) -> Result<ConsultationId, Response> {
    raw.parse::<ConsultationId>().map_err(|_| {
        error_response(
            StatusCode::BAD_REQUEST,
            ErrorResponse::bad_request("Invalid consultation ID"),
        )
    })
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/consultations - Start a consultation
pub async fn create_consultation(
    State(handlers): State<ConsultationHandlers>,
    Json(req): Json<CreateConsultationRequest>,
) -> Response {
    let pathway_id = match PathwayId::new(req.pathway_id) {
        Ok(id) => id,
        Err(err) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                ErrorResponse::bad_request(err.to_string()),
            )
        }
    };

    let patient = match req.patient {
        Some(patient) => match patient.into_context() {
            Ok(patient) => patient,
            Err(err) => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::bad_request(err.to_string()),
                )
            }
        },
        None => crate::domain::consultation::PatientContext::not_specified(),
    };

    let cmd = StartConsultationCommand {
        pathway_id,
        patient,
    };

    match handlers.start_handler.handle(cmd).await {
        Ok(result) => {
            let response: ConsultationResponse = result.view.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(StartConsultationError::PathwayNotFound(id)) => error_response(
            StatusCode::NOT_FOUND,
            ErrorResponse::not_found(format!("Pathway not found: {}", id)),
        ),
        Err(StartConsultationError::Domain(err)) => domain_error_response(&err),
    }
}

/// GET /api/consultations/:id - Current view of a consultation
pub async fn get_consultation(
    State(handlers): State<ConsultationHandlers>,
    Path(consultation_id): Path<String>,
) -> Response {
    let consultation_id = match parse_consultation_id(&consultation_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let query = GetConsultationViewQuery { consultation_id };

    match handlers.view_handler.handle(query).await {
        Ok(view) => {
            let response: ConsultationResponse = view.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(GetConsultationViewError::ConsultationNotFound(id)) => error_response(
            StatusCode::NOT_FOUND,
            ErrorResponse::not_found(format!("Consultation not found: {}", id)),
        ),
        Err(GetConsultationViewError::PathwayNotFound(id)) => error_response(
            StatusCode::NOT_FOUND,
            ErrorResponse::not_found(format!("Pathway not found: {}", id)),
        ),
        Err(GetConsultationViewError::Domain(err)) => domain_error_response(&err),
    }
}

/// POST /api/consultations/:id/answer - Apply a choice
pub async fn answer_question(
    State(handlers): State<ConsultationHandlers>,
    Path(consultation_id): Path<String>,
    Json(req): Json<AnswerRequest>,
) -> Response {
    let consultation_id = match parse_consultation_id(&consultation_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let choice = match (req.answer, req.option) {
        (Some(index), None) => ChoiceSelector::Answer(index),
        (None, Some(index)) => ChoiceSelector::Option(index),
        _ => {
            return error_response(
                StatusCode::BAD_REQUEST,
                ErrorResponse::bad_request("Provide exactly one of 'answer' or 'option'"),
            )
        }
    };

    let cmd = AnswerQuestionCommand {
        consultation_id,
        choice,
    };

    match handlers.answer_handler.handle(cmd).await {
        Ok(result) => {
            let response: ConsultationResponse = result.view.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(AnswerQuestionError::ConsultationNotFound(id)) => error_response(
            StatusCode::NOT_FOUND,
            ErrorResponse::not_found(format!("Consultation not found: {}", id)),
        ),
        Err(AnswerQuestionError::PathwayNotFound(id)) => error_response(
            StatusCode::NOT_FOUND,
            ErrorResponse::not_found(format!("Pathway not found: {}", id)),
        ),
        Err(AnswerQuestionError::SelectionNotFound) => error_response(
            StatusCode::BAD_REQUEST,
            ErrorResponse::bad_request("Selected answer or option does not exist"),
        ),
        Err(AnswerQuestionError::Domain(err)) => domain_error_response(&err),
    }
}

/// POST /api/consultations/:id/back - Step back one question
pub async fn go_back(
    State(handlers): State<ConsultationHandlers>,
    Path(consultation_id): Path<String>,
) -> Response {
    let consultation_id = match parse_consultation_id(&consultation_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .back_handler
        .handle(GoBackCommand { consultation_id })
        .await
    {
        Ok(result) => {
            let response: ConsultationResponse = result.view.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(GoBackError::ConsultationNotFound(id)) => error_response(
            StatusCode::NOT_FOUND,
            ErrorResponse::not_found(format!("Consultation not found: {}", id)),
        ),
        Err(GoBackError::PathwayNotFound(id)) => error_response(
            StatusCode::NOT_FOUND,
            ErrorResponse::not_found(format!("Pathway not found: {}", id)),
        ),
        Err(GoBackError::Domain(err)) => domain_error_response(&err),
    }
}

/// POST /api/consultations/:id/restart - Restart from the root
pub async fn restart_consultation(
    State(handlers): State<ConsultationHandlers>,
    Path(consultation_id): Path<String>,
) -> Response {
    let consultation_id = match parse_consultation_id(&consultation_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .restart_handler
        .handle(RestartConsultationCommand { consultation_id })
        .await
    {
        Ok(result) => {
            let response: ConsultationResponse = result.view.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(RestartConsultationError::ConsultationNotFound(id)) => error_response(
            StatusCode::NOT_FOUND,
            ErrorResponse::not_found(format!("Consultation not found: {}", id)),
        ),
        Err(RestartConsultationError::PathwayNotFound(id)) => error_response(
            StatusCode::NOT_FOUND,
            ErrorResponse::not_found(format!("Pathway not found: {}", id)),
        ),
        Err(RestartConsultationError::Domain(err)) => domain_error_response(&err),
    }
}

/// GET /api/consultations/:id/report - Download the report
pub async fn download_report(
    State(handlers): State<ConsultationHandlers>,
    Path(consultation_id): Path<String>,
) -> Response {
    let consultation_id = match parse_consultation_id(&consultation_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .report_handler
        .handle(GenerateReportQuery { consultation_id })
        .await
    {
        Ok(report) => {
            let disposition = format!("attachment; filename=\"{}\"", report.filename);
            let mut response = (StatusCode::OK, report.content).into_response();
            response.headers_mut().insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            );
            response.headers_mut().insert(
                header::CONTENT_DISPOSITION,
                HeaderValue::from_str(&disposition)
                    .unwrap_or_else(|_| HeaderValue::from_static("attachment")),
            );
            response
        }
        Err(GenerateReportError::ConsultationNotFound(id)) => error_response(
            StatusCode::NOT_FOUND,
            ErrorResponse::not_found(format!("Consultation not found: {}", id)),
        ),
        Err(GenerateReportError::PathwayNotFound(id)) => error_response(
            StatusCode::NOT_FOUND,
            ErrorResponse::not_found(format!("Pathway not found: {}", id)),
        ),
        Err(GenerateReportError::NotConcluded(id)) => error_response(
            StatusCode::CONFLICT,
            ErrorResponse::new(
                "CONSULTATION_ACTIVE",
                format!("Consultation {} has not concluded yet", id),
            ),
        ),
        Err(GenerateReportError::Domain(err)) => domain_error_response(&err),
    }
}

/// DELETE /api/consultations/:id - Abandon a consultation
pub async fn abandon_consultation(
    State(handlers): State<ConsultationHandlers>,
    Path(consultation_id): Path<String>,
) -> Response {
    let consultation_id = match parse_consultation_id(&consultation_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .abandon_handler
        .handle(AbandonConsultationCommand { consultation_id })
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(AbandonConsultationError::ConsultationNotFound(id)) => error_response(
            StatusCode::NOT_FOUND,
            ErrorResponse::not_found(format!("Consultation not found: {}", id)),
        ),
        Err(AbandonConsultationError::Domain(err)) => domain_error_response(&err),
    }
}
