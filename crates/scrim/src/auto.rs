//! Auto-activation policy.
//!
//! Deciding *whether* to activate the overlay is platform policy, not
//! reconciliation mechanism, so it lives here as a pure decision function.
//! The host gathers whatever platform signals it has (a screen-reader probe,
//! user-agent sniffing) and acts on the returned plan: calling
//! [`OverlayManager::activate`] or presenting a manual opt-in affordance.
//!
//! [`OverlayManager::activate`]: crate::OverlayManager::activate

/// Opt-in button text used when the host supplies none.
pub const DEFAULT_OPT_IN_TIP: &str = "Double-tap to enable accessibility mode";

/// Platform signals feeding the auto-activation decision.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformHints {
    /// Whether a screen reader is known to be running, if detectable.
    pub screen_reader: Option<bool>,

    /// Running on a mobile platform where screen-reader state cannot be
    /// probed but a focusable opt-in button is announced reliably.
    pub offer_opt_in: bool,

    /// Activate even when nothing is detectable. Last-resort fallback for
    /// platforms with neither detection nor a usable opt-in affordance.
    pub force: bool,
}

/// What the host should do about activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationPlan {
    /// Call `activate` now.
    Activate,
    /// Present a manual opt-in affordance announcing `tip`, and activate
    /// when the user triggers it.
    OfferOptIn { tip: String },
    /// Leave the overlay off.
    Skip,
}

/// Decide how the overlay should be activated for the current platform.
///
/// An explicit screen-reader signal always wins. When the state is unknown,
/// platforms that can announce a button get the opt-in affordance, and the
/// `force` flag covers the rest.
pub fn activation_plan(hints: &PlatformHints, tip: Option<&str>) -> ActivationPlan {
    match hints.screen_reader {
        Some(true) => ActivationPlan::Activate,
        Some(false) => ActivationPlan::Skip,
        None => {
            if hints.offer_opt_in {
                ActivationPlan::OfferOptIn {
                    tip: tip.unwrap_or(DEFAULT_OPT_IN_TIP).to_string(),
                }
            } else if hints.force {
                ActivationPlan::Activate
            } else {
                ActivationPlan::Skip
            }
        }
    }
}
