use opentelemetry::{KeyValue, metrics::UpDownCounter};
use std::sync::LazyLock;

static STATDS: LazyLock<UpDownCounter<i64>> = LazyLock::new(|| {
    logfire::i64_up_down_counter("petmate_statds")
        .with_description("Petmate app statistics")
        .with_unit("attempt")
        .build()
});

fn incr_statds(metric: String, value: String) {
    STATDS.add(1, &[KeyValue::new(metric, value)]);
}

pub fn incr_user_action_statds(action: &str) {
    incr_statds("user_action".to_string(), action.into())
}

pub fn incr_pet_action_statds(action: &str) {
    incr_statds("pet_action".to_string(), action.into())
}

pub fn incr_breeding_action_statds(action: &str) {
    incr_statds("breeding_action".to_string(), action.into())
}
