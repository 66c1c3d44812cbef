#![deny(missing_docs)]

//! # Generator
//!
//! Resolves the output settings, runs the translation pass and writes `api.proto`.
//!
//! The schema is assembled and rendered in memory before any file is touched, so
//! a failing pass leaves nothing behind. Written files are recorded in
//! [`GeneratedFiles`] and removed if a later step fails.

use std::fs;
use std::path::{Path, PathBuf};

use protodef_core::{render_proto, ApiDescription, RenderOptions, DESIGN_FORMAT_VERSION};
use tracing::{debug, info};

use crate::cleanup::GeneratedFiles;
use crate::error::{CliError, CliResult};
use crate::schema::DesignArgs;

/// Name of the generated file.
pub const OUTPUT_FILE: &str = "api.proto";

/// Scheme used when neither the flags nor the design provide one.
const DEFAULT_SCHEME: &str = "http";

/// Arguments for the generate command.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Design selection.
    #[clap(flatten)]
    pub design: DesignArgs,

    /// Output directory.
    #[clap(long, env = "PROTODEF_OUT", default_value = ".")]
    pub out: PathBuf,

    /// Scheme of the API endpoint, defaults to the first design scheme.
    #[clap(long, env = "PROTODEF_SCHEME")]
    pub scheme: Option<String>,

    /// Host of the API endpoint, defaults to the design host.
    #[clap(long, env = "PROTODEF_HOST")]
    pub host: Option<String>,

    /// Proto package name.
    #[clap(long, env = "PROTODEF_PACKAGE", default_value = "proto")]
    pub package: String,

    /// Design format version the caller expects; must share the major version.
    #[clap(long)]
    pub design_version: Option<String>,
}

/// A configured generation run over one design.
#[derive(Debug)]
pub struct Generator<'a> {
    api: &'a ApiDescription,
    args: &'a GenerateArgs,
    scheme: String,
    host: String,
}

impl<'a> Generator<'a> {
    /// Resolves scheme and host from the flags, then the design.
    pub fn new(api: &'a ApiDescription, args: &'a GenerateArgs) -> CliResult<Self> {
        let scheme = args
            .scheme
            .clone()
            .filter(|s| !s.is_empty())
            .or_else(|| api.schemes.first().cloned())
            .unwrap_or_else(|| DEFAULT_SCHEME.to_string());

        let host = args
            .host
            .clone()
            .filter(|h| !h.is_empty())
            .or_else(|| api.host.clone())
            .filter(|h| !h.is_empty())
            .ok_or_else(|| CliError::General("missing host value, set it with --host".into()))?;

        Ok(Self {
            api,
            args,
            scheme,
            host,
        })
    }

    /// Endpoint written in the file header.
    pub fn endpoint(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }

    /// Writes the proto file and returns its path.
    pub fn generate(&self, files: &GeneratedFiles) -> CliResult<PathBuf> {
        fs::create_dir_all(&self.args.out)?;

        let services = self.args.design.assemble(self.api)?;
        let options = RenderOptions {
            package: self.args.package.clone(),
            title: Some(self.api.title.clone().unwrap_or_else(|| self.api.name.clone())),
            endpoint: Some(self.endpoint()),
        };
        let code = render_proto(&services, &options);

        let path = self.args.out.join(OUTPUT_FILE);
        ensure_delete(&path)?;
        files.record(path.clone());
        fs::write(&path, code)?;

        info!(path = %path.display(), services = services.len(), "generated proto file");
        Ok(path)
    }
}

/// Checks that `requested` shares its major version with the supported format.
pub fn check_version(requested: Option<&str>) -> CliResult<()> {
    let Some(requested) = requested.filter(|v| !v.is_empty()) else {
        return Ok(());
    };

    let major = |v: &str| v.trim_start_matches('v').split('.').next().map(str::to_string);
    if major(requested) != major(DESIGN_FORMAT_VERSION) {
        return Err(CliError::General(format!(
            "design format version {} is not compatible with supported version {}",
            requested, DESIGN_FORMAT_VERSION
        )));
    }
    Ok(())
}

/// Executes the generate command.
///
/// On failure every file recorded during the run is removed.
pub fn execute(args: &GenerateArgs, files: &GeneratedFiles) -> CliResult<PathBuf> {
    check_version(args.design_version.as_deref())?;

    let api = args.design.load()?;
    debug!(design = %args.design.design.display(), api = %api.name, "loaded design");

    let result = Generator::new(&api, args).and_then(|generator| generator.generate(files));
    if result.is_err() {
        files.cleanup();
    }
    result
}

fn ensure_delete(path: &Path) -> CliResult<()> {
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}
