use std::fmt;

/// Version and build metadata baked in by `build.rs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub build_time: &'static str,
    pub builder_os: &'static str,
    pub builder_arch: &'static str,
}

impl BuildInfo {
    pub const CURRENT: BuildInfo = BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
        build_time: env!("GUEXT_BUILD_TIME"),
        builder_os: env!("GUEXT_BUILDER_OS"),
        builder_arch: env!("GUEXT_BUILDER_ARCH"),
    };
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "guext version info:")?;
        writeln!(f, "- Version: {}", self.version)?;
        writeln!(f, "- Build time: {}", self.build_time)?;
        writeln!(f, "- Builder OS: {}", self.builder_os)?;
        write!(f, "- Builder Arch: {}", self.builder_arch)
    }
}
