//! Submission pipeline shared by every form.
//!
//! Nothing here touches a form's draft. Forms release their draft lock before
//! calling in, so notifiers and navigators are free to read the form back.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::{
    FormServices, SubmitOutcome, ValidationError, MSG_GENERATED, MSG_INSUFFICIENT_CREDITS,
    MSG_REQUEST_FAILED, MSG_SIGN_IN_REQUIRED,
};
use crate::api::{GenerationRequest, GenerationResponse};
use crate::context::CoverUpdate;
use crate::models::Cover;
use crate::navigation::Route;
use crate::notify::Toast;
use crate::selection::SelectionError;

/// Rejects re-entrant submits while a request is in flight.
///
/// The loading flag is owned by the permit, so it ends on every exit path.
#[derive(Debug, Clone, Default)]
pub struct SubmitGate {
    loading: Arc<AtomicBool>,
}

impl SubmitGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a submission, or `None` if one is already running.
    pub fn try_enter(&self) -> Option<SubmitPermit> {
        self.loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmitPermit {
                loading: Arc::clone(&self.loading),
            })
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }
}

/// Held for the duration of one submission.
#[derive(Debug)]
pub struct SubmitPermit {
    loading: Arc<AtomicBool>,
}

impl Drop for SubmitPermit {
    fn drop(&mut self) {
        self.loading.store(false, Ordering::Release);
    }
}

/// Surface a validation error. No request is made.
pub(crate) fn invalid(
    services: &FormServices,
    error: ValidationError,
    duration: Option<Duration>,
) -> SubmitOutcome {
    let toast = Toast::error(error.to_string());
    let toast = match duration {
        Some(d) => toast.with_duration(d),
        None => toast,
    };
    services.notifier.notify(toast);
    SubmitOutcome::Invalid(error)
}

fn redirect(services: &FormServices, message: &str, route: Route) -> SubmitOutcome {
    services.notifier.notify(Toast::error(message));
    services.navigator.push(route);
    SubmitOutcome::Redirected(route)
}

/// Require a signed-in user with at least one credit left.
pub(crate) fn check_session(services: &FormServices) -> Result<(), SubmitOutcome> {
    let Some(user) = services.context.user() else {
        return Err(redirect(services, MSG_SIGN_IN_REQUIRED, Route::SignIn));
    };
    if user.out_of_credits() {
        return Err(redirect(services, MSG_INSUFFICIENT_CREDITS, Route::Pricing));
    }
    Ok(())
}

/// Send `request` and handle every non-success answer.
///
/// On success the user snapshot is refreshed before returning; the caller
/// resets its draft and then calls [`announce`].
pub(crate) async fn dispatch(services: &FormServices, request: &GenerationRequest) -> SubmitOutcome {
    match services.client.generate(request).await {
        Err(e) => {
            log::error!("Generation request failed: {}", e);
            services.notifier.notify(Toast::error(MSG_REQUEST_FAILED));
            SubmitOutcome::Failed
        }
        Ok(GenerationResponse::Unauthorized) => {
            redirect(services, MSG_SIGN_IN_REQUIRED, Route::SignIn)
        }
        Ok(GenerationResponse::Rejected { code, message }) => {
            services.notifier.notify(Toast::error(message.clone()));
            SubmitOutcome::Rejected { code, message }
        }
        Ok(GenerationResponse::Generated(cover)) => {
            services.context.fetch_user_info().await;
            SubmitOutcome::Generated(cover)
        }
    }
}

/// Success toast, then the new cover goes to the front of the shared list.
pub(crate) fn announce(services: &FormServices, cover: Option<Cover>) {
    services.notifier.notify(Toast::success(MSG_GENERATED));
    if let Some(cover) = cover {
        log::info!("New cover {:?}", cover.id());
        services.context.set_covers(CoverUpdate::prepend(cover));
    }
}

/// Surface a rejected picker or drop selection.
///
/// Call with the draft lock released; the notifier may read the form back.
pub(crate) fn report_selection(
    services: &FormServices,
    result: Result<(), SelectionError>,
) -> Result<(), SelectionError> {
    result.inspect_err(|e| {
        log::warn!("Rejected selection: {:?}", e);
        services.notifier.notify(Toast::error(e.to_string()));
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_rejects_second_entry() {
        let gate = SubmitGate::new();
        let permit = gate.try_enter();
        assert!(permit.is_some());
        assert!(gate.is_loading());
        assert!(gate.try_enter().is_none());
    }

    #[test]
    fn test_permit_drop_ends_loading() {
        let gate = SubmitGate::new();
        {
            let _permit = gate.try_enter().unwrap();
            assert!(gate.is_loading());
        }
        assert!(!gate.is_loading());
        assert!(gate.try_enter().is_some());
    }

    #[test]
    fn test_gate_clones_share_flag() {
        let gate = SubmitGate::new();
        let clone = gate.clone();
        let _permit = gate.try_enter().unwrap();
        assert!(clone.is_loading());
    }
}
