//! Cross-crate tests: the hash-list reader, the worker pool and the sink
//! wired together the way the CLI wires them.

#[cfg(test)]
mod search {
    mod integration;
    mod partition;
}
