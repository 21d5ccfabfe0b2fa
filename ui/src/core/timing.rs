//! Timer helpers shared by the widgets.

/// Suspends the current task for `ms` milliseconds.
pub async fn sleep_ms(ms: u64) {
    #[cfg(target_arch = "wasm32")]
    {
        let clamped = ms.min(u32::MAX as u64) as u32;
        gloo_timers::future::TimeoutFuture::new(clamped).await;
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
    }
}

/// How long the login success panel stays up before the modal closes.
pub const LOGIN_SUCCESS_CLOSE_MS: u64 = 2_000;

/// How long the "Try Another" button shows its error label.
pub const NEXT_QUESTION_ERROR_MS: u64 = 2_000;
