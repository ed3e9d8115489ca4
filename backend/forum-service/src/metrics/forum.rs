use lazy_static::lazy_static;
use prometheus::{register_int_counter_vec, IntCounterVec};

lazy_static! {
    /// Content mutations by entity (post/comment), action and result.
    pub static ref MUTATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "forum_mutations_total",
        "Forum content mutations segmented by entity, action and result",
        &["entity", "action", "result"]
    )
    .expect("failed to register forum_mutations_total");

    /// Modification attempts rejected by the ownership/moderator rule.
    pub static ref AUTHORIZATION_DENIALS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "forum_authorization_denials_total",
        "Forum modifications denied by authorization",
        &["entity"]
    )
    .expect("failed to register forum_authorization_denials_total");

    /// Logins by outcome (existing/created/conflict).
    pub static ref LOGINS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "forum_logins_total",
        "Username logins segmented by outcome",
        &["outcome"]
    )
    .expect("failed to register forum_logins_total");
}

/// Record the outcome of a content mutation.
pub fn record_mutation<T, E>(entity: &str, action: &str, result: &std::result::Result<T, E>) {
    let outcome = if result.is_ok() { "ok" } else { "error" };
    MUTATIONS_TOTAL
        .with_label_values(&[entity, action, outcome])
        .inc();
}
