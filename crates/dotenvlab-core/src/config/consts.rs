//! Constants shared across the workspace

/// Release coordinates for the wrapped validator binary
pub mod release {
    /// GitHub account publishing dotenvcrab releases
    pub const OWNER: &str = "Dali-Aissaoui";

    /// Repository name
    pub const REPO: &str = "dotenvcrab";

    /// Default base URL for release downloads
    pub const DEFAULT_BASE_URL: &str = "https://github.com";

    /// Environment variable overriding the release base URL (mirrors, tests)
    pub const BASE_URL_ENV: &str = "DOTENVLAB_RELEASE_BASE";
}

/// The wrapped binary and its invocation defaults
pub mod crab {
    /// Base name of the validator binary
    pub const BINARY_NAME: &str = "dotenvcrab";

    /// Env file passed to the validator when none is given
    pub const DEFAULT_ENV_FILE: &str = ".env";

    /// Schema file passed to the validator when none is given
    pub const DEFAULT_SCHEMA_FILE: &str = "env.schema.json";
}

/// Package directory layout
pub mod package {
    /// Environment variable overriding the package root directory
    pub const PACKAGE_DIR_ENV: &str = "DOTENVLAB_DIR";

    /// Subdirectory of the package root holding the resolved binary
    pub const BIN_DIR: &str = "bin";

    /// File name of the persisted resolution state
    pub const STATE_FILE: &str = "state.json";
}
