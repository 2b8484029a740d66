//! Structured log helpers.
//!
//! Every line carries a `subsystem` field so log pipelines can split the
//! checkpoint guard from the consensus tuner without parsing messages.

/// Log with a `subsystem` field attached.
///
/// ```rust,ignore
/// log_event!(warn, "checkpoint-guard", "Stale epoch", elapsed_s = 4000u64);
/// ```
#[macro_export]
macro_rules! log_event {
    (info, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            subsystem = $subsystem,
            $($($field)*,)?
            $msg
        )
    };

    (warn, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::warn!(
            subsystem = $subsystem,
            $($($field)*,)?
            $msg
        )
    };

    (error, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::error!(
            subsystem = $subsystem,
            $($($field)*,)?
            $msg
        )
    };

    (debug, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::debug!(
            subsystem = $subsystem,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a checkpoint-related event with the epoch and source attached.
#[macro_export]
macro_rules! log_checkpoint_event {
    ($level:ident, $msg:expr, $epoch_id:expr, $source:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            subsystem = "checkpoint-guard",
            epoch_id = $epoch_id,
            source = %$source,
            $($($field)*,)?
            $msg
        )
    };
}
