//! Cross-crate tests exercising the full pattern to simulation pipeline.

#[cfg(test)]
mod acceptance;
#[cfg(test)]
mod canonicalization;
