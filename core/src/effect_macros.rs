//! Declarative macros for ergonomic effect construction
//!
//! Effect handlers mostly wrap one backend call in an `Effect::Future`; the
//! macro removes the `Box::pin(async move { .. })` noise.

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```rust,ignore
/// use annotator_core::async_effect;
///
/// let api = Arc::clone(&env.api);
/// async_effect! {
///     match api.licenses().await {
///         Ok(licenses) => Some(SearchAction::RequestLicensesComplete { licenses }),
///         Err(error) => Some(SearchAction::RequestLicensesFailed { error: error.to_string() }),
///     }
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}
