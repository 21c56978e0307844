//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `studydeck_core` linkage and
//!   store bootstrap outside the mobile runtime.
//! - Keep output deterministic for quick local sanity checks.

use studydeck_core::db::{migrations, open_db_in_memory};

fn main() {
    println!("studydeck_core ping={}", studydeck_core::ping());
    println!("studydeck_core version={}", studydeck_core::core_version());

    let bootstrap = match open_db_in_memory() {
        Ok(_conn) => "ok".to_string(),
        Err(err) => format!("error: {err}"),
    };
    println!(
        "studydeck_core store_bootstrap={bootstrap} schema_version={}",
        migrations::latest_version()
    );
}
