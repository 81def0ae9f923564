//! Binary-level test suite: end-to-end scenarios across the whole pipeline.
