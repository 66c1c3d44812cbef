#![deny(missing_docs)]

//! # Schema Command
//!
//! Prints the normalized service schema of a design as JSON.

use std::path::PathBuf;

use protodef_core::{
    render_schema_json, ApiDescription, AssemblerOptions, SchemaAssembler, ServiceDefinition,
    ViewPolicy,
};

use crate::error::CliResult;

/// Arguments locating and interpreting a design file.
#[derive(clap::Args, Debug, Clone)]
pub struct DesignArgs {
    /// Path to the design file (YAML or JSON).
    #[clap(long, env = "PROTODEF_DESIGN")]
    pub design: PathBuf,

    /// Fail when several views of a media type compete for one message
    /// instead of keeping the last one by name.
    #[clap(long)]
    pub strict_views: bool,
}

impl DesignArgs {
    /// Translation options selected by the flags.
    pub fn assembler_options(&self) -> AssemblerOptions {
        AssemblerOptions {
            view_policy: if self.strict_views {
                ViewPolicy::Reject
            } else {
                ViewPolicy::LastWins
            },
        }
    }

    /// Loads the design file.
    pub fn load(&self) -> CliResult<ApiDescription> {
        Ok(ApiDescription::load(&self.design)?)
    }

    /// Runs the translation pass over a loaded design.
    pub fn assemble(&self, api: &ApiDescription) -> CliResult<Vec<ServiceDefinition>> {
        let services = SchemaAssembler::new(api)
            .with_options(self.assembler_options())
            .assemble()?;
        Ok(services)
    }
}

/// Arguments for the schema command.
#[derive(clap::Args, Debug, Clone)]
pub struct SchemaArgs {
    /// Design selection.
    #[clap(flatten)]
    pub design: DesignArgs,
}

/// Builds the JSON document for the design.
pub fn render(args: &SchemaArgs) -> CliResult<String> {
    let api = args.design.load()?;
    let services = args.design.assemble(&api)?;
    Ok(render_schema_json(&services)?)
}

/// Executes the schema command.
pub fn execute(args: &SchemaArgs) -> CliResult<()> {
    println!("{}", render(args)?);
    Ok(())
}
