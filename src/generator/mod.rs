//! The generator: config + template in, one source file out.
//!
//! A run is strictly linear and every failure is fatal:
//!
//! 1. Load the JSON configuration
//! 2. Read and parse the template
//! 3. Render it, prefixed with the package declaration
//! 4. Write the result atomically to the output path
//!
//! The package name is taken as given and written verbatim.
//!
//! The config is loaded before the template is touched, so a malformed
//! config is reported even when the template is missing too.


use crate::config::Configuration;
use crate::error::{FactoryError, Result};
use crate::fs::atomic_write_file;
use crate::template::{Template, TemplateError};
use std::path::PathBuf;
use tracing::{debug, info};

/// Package name used when none is given.
pub const DEFAULT_PACKAGE: &str = "codegen";

/// Template path used when none is given, relative to the working directory.
pub const DEFAULT_TEMPLATE: &str = "templates/things.tmpl";

/// Config path used when none is given, relative to the working directory.
pub const DEFAULT_CONFIG: &str = "config/base.json";

/// Output path used when none is given.
pub const DEFAULT_OUT: &str = "out.go";

/// Everything one generator run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    /// Package name written into the declaration line and `{{.Package}}`.
    pub package: String,
    /// Template file to render.
    pub template: PathBuf,
    /// JSON configuration file.
    pub config: PathBuf,
    /// File to write.
    pub out: PathBuf,
}

impl Default for GenerateRequest {
    fn default() -> Self {
        Self {
            package: DEFAULT_PACKAGE.to_string(),
            template: PathBuf::from(DEFAULT_TEMPLATE),
            config: PathBuf::from(DEFAULT_CONFIG),
            out: PathBuf::from(DEFAULT_OUT),
        }
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Where the file was written.
    pub path: PathBuf,
    /// Number of bytes written.
    pub bytes: usize,
}

/// Run the generator once.
///
/// # Returns
///
/// * `Ok(GeneratedFile)` - The output was written
/// * `Err(FactoryError::Io)` - A file could not be read or the output written
/// * `Err(FactoryError::ConfigParse)` / `Err(FactoryError::TemplateParse)` - Malformed input
/// * `Err(FactoryError::Render)` - The template references an unknown field
pub fn generate(request: &GenerateRequest) -> Result<GeneratedFile> {
    let config = Configuration::load(&request.config)?;

    let text = std::fs::read_to_string(&request.template)
        .map_err(|e| FactoryError::io("read template", &request.template, e))?;
    let template = Template::parse(&text).map_err(|source| FactoryError::TemplateParse {
        path: request.template.clone(),
        source,
    })?;
    debug!(
        path = %request.template.display(),
        fields = template.fields().count(),
        "parsed template"
    );

    let source = render_source(&request.package, &template, &config).map_err(|source| {
        FactoryError::Render {
            path: request.template.clone(),
            source,
        }
    })?;

    atomic_write_file(&request.out, &source)?;
    info!(
        path = %request.out.display(),
        package = %request.package,
        bytes = source.len(),
        "wrote generated file"
    );

    Ok(GeneratedFile {
        path: request.out.clone(),
        bytes: source.len(),
    })
}

/// Produce the full text of a generated file.
///
/// The output is the package declaration, a blank line, then the template
/// rendered with `Package` set to `package`. It depends on nothing but its
/// arguments.
pub fn render_source(
    package: &str,
    template: &Template,
    config: &Configuration,
) -> std::result::Result<String, TemplateError> {
    let config = config.clone().with_package(package);
    let body = template.render(&config)?;

    let mut source = package_declaration(package);
    source.push_str("\n\n");
    source.push_str(&body);
    Ok(source)
}

/// The declaration line that opens every generated file.
pub fn package_declaration(package: &str) -> String {
    format!("package {}", package)
}
