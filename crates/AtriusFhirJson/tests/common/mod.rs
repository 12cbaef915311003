use std::sync::Once;

use atrius_fhir_lib::Composite;

static TRACING: Once = Once::new();

/// Routes codec logs to the test output; filter with `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Marshals a value and returns the JSON as a string.
#[allow(dead_code)]
pub fn to_json(value: &dyn Composite) -> String {
    init_tracing();
    let bytes = atrius_fhir_json::marshal(value)
        .unwrap_or_else(|e| panic!("marshal {} failed: {}", value.type_name(), e));
    String::from_utf8(bytes).expect("codec emits UTF-8")
}
