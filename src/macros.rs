/// Writes the universal diagnostic to stderr and logs what actually failed.
#[macro_export]
macro_rules! report {
    ($err:expr) => {{
        use std::io::Write as _;
        let err = &$err;
        tracing::debug!(error = %err, "reporting failure");
        let _ = std::io::stderr().write_all($crate::ERROR_MESSAGE.as_bytes());
    }};
}
