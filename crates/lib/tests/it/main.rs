/*! Integration tests for Confstore.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - tree: Tests for paths, tree navigation and traversal
 * - backend: Tests for the Configuration contract on the InMemory store, including file persistence
 * - reference_index: Tests for identifier lookup and index maintenance
 * - olock: Tests for fingerprints, merging and the optimistic locking decorator
 * - caching: Tests for the read cache decorator
 * - composition: Tests for full decorator stacks in different orders
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("confstore=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod backend;
mod caching;
mod composition;
mod helpers;
mod olock;
mod tree;
