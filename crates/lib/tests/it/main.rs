/*! Integration tests for tagdown.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - tag: Path lookups, deferred handles, assignment and deletion on Tag
 * - list: Content and attribute list reconciliation through the public API
 * - path: TagPath construction and how paths address a tree
 * - value: Value coercion in both directions
 * - frozen: FrozenTag snapshots
 * - syntax: The Syntax seam with the built-in and a custom syntax
 * - properties: proptest properties over generated trees
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("tagdown=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod helpers;
mod path;
mod properties;
mod syntax;
mod value;
