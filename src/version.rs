use crate::build;

/// Long version string shown by `--version`.
pub fn long_version() -> String {
    let dirty = if build::GIT_CLEAN { "" } else { "-dirty" };
    format!(
        "{} ({}{})\nBuild: {}\nTarget: {} ({})\nRustc: {}",
        build::PKG_VERSION,
        build::SHORT_COMMIT,
        dirty,
        build::BUILD_TIME,
        build::BUILD_TARGET,
        build::BUILD_OS,
        build::RUST_VERSION,
    )
}
