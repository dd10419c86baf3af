//! Canonical logging macros
//!
//! Callers must depend on `tracing` and `polcmp-core-types`.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use polcmp_core::log_op_start;
/// log_op_start!("list_all");
/// log_op_start!("list_all", path = "policies");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = polcmp_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = polcmp_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use polcmp_core::log_op_end;
/// log_op_end!("list_all", duration_ms = 42);
/// log_op_end!("list_all", duration_ms = 42, item_count = 7);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = polcmp_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = polcmp_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log a classified failure at error severity
///
/// Accepts either a `PcError` or a `&PcError`.
///
/// # Example
///
/// ```
/// # use polcmp_core::log_op_error;
/// use polcmp_core::errors::{PcError, PcErrorKind};
/// let err = PcError::new(PcErrorKind::NotFound).with_path("policies/7");
/// log_op_error!("get", &err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let pc_err_ref = &$err;
        let pc_err: &$crate::errors::PcError =
            ::std::borrow::Borrow::<$crate::errors::PcError>::borrow(pc_err_ref);
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = polcmp_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?pc_err.kind(),
            err.code = pc_err.code(),
            err.message = pc_err.message(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let pc_err_ref = &$err;
        let pc_err: &$crate::errors::PcError =
            ::std::borrow::Borrow::<$crate::errors::PcError>::borrow(pc_err_ref);
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = polcmp_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?pc_err.kind(),
            err.code = pc_err.code(),
            err.message = pc_err.message(),
            $($field)*
        );
    }};
}
