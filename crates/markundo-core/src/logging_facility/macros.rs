//! Operation logging macros
//!
//! Every engine operation emits one `start` event and then exactly one `end`
//! or `end_error` event. The closing macros take the `Instant` captured
//! before the operation and derive `duration_ms` from it.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use markundo_core::log_op_start;
/// log_op_start!("undo");
/// log_op_start!("undo", undo_len = 3);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_START,
            $($($field)*)?
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use markundo_core::log_op_end;
/// let started = std::time::Instant::now();
/// log_op_end!("clear", started);
/// log_op_end!("rollback", started, undo_len = 2);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, $started:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_END,
            duration_ms = $crate::logging_facility::elapsed_ms($started),
            $($($field)*)?
        );
    };
}

/// Log the end of an undo or redo replay
///
/// `replayed` counts the commands replayed; `affected` is the node handed
/// back to the caller and is left out of the event when there is none.
///
/// # Example
///
/// ```
/// # use markundo_core::{log_replay_end, types::NodeId};
/// let started = std::time::Instant::now();
/// log_replay_end!("undo", started, replayed = 2, affected = Some(NodeId::from_index(4)));
/// log_replay_end!("redo", started, replayed = 0, affected = None::<NodeId>);
/// ```
#[macro_export]
macro_rules! log_replay_end {
    ($op:expr, $started:expr, replayed = $replayed:expr, affected = $affected:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_END,
            duration_ms = $crate::logging_facility::elapsed_ms($started),
            replayed = $replayed,
            node_id = $affected.map(tracing::field::display),
        );
    };
}

/// Log an operation error
///
/// Accepts a `TreeError` or an `ExError`. The operation name is attached to
/// the error so `error` renders the same text the caller would print.
///
/// # Example
///
/// ```
/// # use markundo_core::{log_op_error, errors::TreeError, types::NodeId};
/// let started = std::time::Instant::now();
/// let err = TreeError::NodeNotFound { node: NodeId::from_index(9) };
/// log_op_error!("undo", err, started);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, $started:expr $(, $($field:tt)*)?) => {{
        let ex_err = $crate::errors::ExError::from($err).with_op($op);
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_END_ERROR,
            duration_ms = $crate::logging_facility::elapsed_ms($started),
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            node_id = ex_err.node_id().map(tracing::field::display),
            error = %ex_err,
            $($($field)*)?
        );
    }};
}
