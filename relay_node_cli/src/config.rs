// SPDX-License-Identifier: AGPL-3.0-or-later

use std::convert::TryFrom;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use relay_node::Configuration;
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "config.toml";

const ENV_PREFIX: &str = "RELAY_NODE_";

const DEFAULT_LOG_LEVEL: &str = "off";

const DEFAULT_HTTP_PORT: u16 = 2020;

type ConfigFilePath = Option<PathBuf>;

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_http_port() -> u16 {
    DEFAULT_HTTP_PORT
}

/// Get configuration from 1. .toml file, 2. environment variables and 3. command line arguments
/// (in that order, meaning that later configuration sources take precedence over the earlier
/// ones).
///
/// The returned configuration is still unchecked and needs to be converted into a
/// `relay_node::Configuration`.
pub fn load_config() -> Result<(ConfigFilePath, ConfigFile)> {
    // Parse command line arguments first to get optional config file path
    let cli = Cli::parse();

    // Determine if a config file path was provided or if we should look for it in common locations
    let config_file_path: ConfigFilePath = match &cli.config {
        Some(path) => {
            if !path.exists() {
                bail!("Config file '{}' does not exist", path.display());
            }

            Some(path.clone())
        }
        None => try_determine_config_file_path(),
    };

    let config = figment(cli, &config_file_path).extract()?;
    Ok((config_file_path, config))
}

fn figment(cli: Cli, config_file_path: &ConfigFilePath) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(ConfigFile::default()));
    if let Some(path) = config_file_path {
        figment = figment.merge(Toml::file(path));
    }

    figment
        .merge(Env::prefixed(ENV_PREFIX))
        .merge(Serialized::defaults(cli))
}

/// Configuration derived from command line arguments.
///
/// All arguments are optional and don't get serialized to Figment when they're None. This is to
/// assure that default values do not overwrite all previous settings, especially when they haven't
/// been set.
#[derive(Parser, Serialize, Debug)]
#[command(
    name = "relay-node",
    about = "GraphQL server refetching any object by its global id",
    long_about = None,
    version
)]
struct Cli {
    /// Path to an optional "config.toml" file for further configuration.
    ///
    /// When not set the program will try to find a `config.toml` file in the same folder the
    /// program is executed in and otherwise in the regarding operation systems XDG config
    /// directory ("$HOME/.config/relay-node/config.toml" on Linux).
    #[arg(short = 'c', long, value_name = "PATH")]
    #[serde(skip_serializing_if = "Option::is_none")]
    config: Option<PathBuf>,

    /// HTTP port serving the GraphQL API. Defaults to 2020.
    #[arg(short = 'p', long, value_name = "PORT")]
    #[serde(skip_serializing_if = "Option::is_none")]
    http_port: Option<u16>,

    /// Name of the interface implemented by all refetchable objects. Defaults to "Node".
    #[arg(short = 'i', long, value_name = "NAME")]
    #[serde(skip_serializing_if = "Option::is_none")]
    interface_name: Option<String>,

    /// Name of the root field fetching one object by its id. Defaults to "node".
    #[arg(long, value_name = "NAME")]
    #[serde(skip_serializing_if = "Option::is_none")]
    node_field_name: Option<String>,

    /// Name of the root field fetching many objects by their ids. Defaults to "nodes".
    #[arg(long, value_name = "NAME")]
    #[serde(skip_serializing_if = "Option::is_none")]
    nodes_field_name: Option<String>,

    /// Maximum number of ids a single "nodes" query may ask for. Defaults to 100.
    #[arg(short = 'm', long, value_name = "NUMBER")]
    #[serde(skip_serializing_if = "Option::is_none")]
    max_nodes_per_query: Option<usize>,

    /// Set log verbosity. Use this for learning more about how the server behaves or for
    /// debugging.
    ///
    /// Possible log levels are: ERROR, WARN, INFO, DEBUG, TRACE. They are scoped to "relay_node"
    /// by default.
    ///
    /// If you want to adjust the scope for deeper inspection use a filter value, for example
    /// "=TRACE" for logging _everything_ or "relay_node=DEBUG,hyper=INFO" etc.
    #[arg(short = 'l', long, value_name = "LEVEL")]
    #[serde(skip_serializing_if = "Option::is_none")]
    log_level: Option<String>,
}

/// Unchecked configuration as read from all configuration sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Log verbosity, "off" by default.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// HTTP port serving the GraphQL API, defaults to 2020.
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Name of the node interface.
    #[serde(default)]
    pub interface_name: Option<String>,

    /// Name of the singular node root field.
    #[serde(default)]
    pub node_field_name: Option<String>,

    /// Name of the plural node root field.
    #[serde(default)]
    pub nodes_field_name: Option<String>,

    /// Maximum number of ids per plural query.
    #[serde(default)]
    pub max_nodes_per_query: Option<usize>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            http_port: default_http_port(),
            interface_name: None,
            node_field_name: None,
            nodes_field_name: None,
            max_nodes_per_query: None,
        }
    }
}

impl ConfigFile {
    /// Logging filter for `env_logger`.
    ///
    /// A plain level is scoped to this program, anything containing a filter directive is taken
    /// as is.
    pub fn log_filter(&self) -> String {
        if self.log_level.contains('=') {
            self.log_level.clone()
        } else {
            format!("relay_node={}", self.log_level)
        }
    }
}

impl TryFrom<ConfigFile> for Configuration {
    type Error = anyhow::Error;

    fn try_from(value: ConfigFile) -> Result<Self, Self::Error> {
        let defaults = Configuration::default();

        let config = Configuration {
            interface_name: value.interface_name.unwrap_or(defaults.interface_name),
            node_field_name: value.node_field_name.unwrap_or(defaults.node_field_name),
            nodes_field_name: value.nodes_field_name.unwrap_or(defaults.nodes_field_name),
            max_nodes_per_query: value
                .max_nodes_per_query
                .unwrap_or(defaults.max_nodes_per_query),
        };

        for name in [
            &config.interface_name,
            &config.node_field_name,
            &config.nodes_field_name,
        ] {
            if !is_graphql_name(name) {
                bail!("'{name}' is not a valid GraphQL name");
            }
        }

        if config.node_field_name == config.nodes_field_name {
            bail!("Node and nodes fields can't both be named '{}'", config.node_field_name);
        }

        if config.max_nodes_per_query == 0 {
            bail!("Maximum number of nodes per query needs to be at least 1");
        }

        Ok(config)
    }
}

/// Returns true if `name` matches `/[_A-Za-z][_0-9A-Za-z]*/` and is not reserved for
/// introspection.
fn is_graphql_name(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_valid = matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic());

    starts_valid
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        && !name.starts_with("__")
}

fn try_determine_config_file_path() -> Option<PathBuf> {
    // Find config file in current folder
    let current_dir = std::env::current_dir()
        .ok()
        .map(|dir| dir.join(CONFIG_FILE_NAME));

    // Find config file in XDG config folder
    let xdg_config_dir = ProjectDirs::from("", "", "relay-node")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME));

    vec![current_dir, xdg_config_dir]
        .into_iter()
        .flatten()
        .find(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;
    use std::path::PathBuf;

    use clap::Parser;
    use figment::Jail;
    use relay_node::Configuration;
    use rstest::rstest;

    use super::{figment, Cli, ConfigFile};

    fn extract(args: &[&str], config_file: Option<&str>) -> figment::error::Result<ConfigFile> {
        let cli = Cli::parse_from(args);
        let config_file_path = config_file.map(PathBuf::from);
        figment(cli, &config_file_path).extract()
    }

    #[test]
    fn defaults() {
        Jail::expect_with(|_jail| {
            let config = extract(&["relay-node"], None)?;
            assert_eq!(config, ConfigFile::default());
            assert_eq!(
                Configuration::try_from(config).unwrap(),
                Configuration::default()
            );
            Ok(())
        });
    }

    #[test]
    fn later_sources_take_precedence() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                http_port = 3000
                interface_name = "Entity"
                max_nodes_per_query = 10
                "#,
            )?;
            jail.set_env("RELAY_NODE_HTTP_PORT", 4000);
            jail.set_env("RELAY_NODE_LOG_LEVEL", "debug");

            let config = extract(&["relay-node", "-m", "20"], Some("config.toml"))?;
            assert_eq!(config.http_port, 4000);
            assert_eq!(config.log_level, "debug");
            assert_eq!(config.log_filter(), "relay_node=debug");

            let config = Configuration::try_from(config).unwrap();
            assert_eq!(config.interface_name, "Entity");
            assert_eq!(config.node_field_name, "node");
            assert_eq!(config.max_nodes_per_query, 20);
            Ok(())
        });
    }

    #[rstest]
    #[case::invalid_interface(&["relay-node", "-i", "Not-A-Name"])]
    #[case::reserved_name(&["relay-node", "--node-field-name", "__node"])]
    #[case::same_field_names(&["relay-node", "--nodes-field-name", "node"])]
    #[case::zero_limit(&["relay-node", "-m", "0"])]
    fn rejects_invalid_values(#[case] args: &'static [&'static str]) {
        Jail::expect_with(|_jail| {
            let config = extract(args, None)?;
            assert!(Configuration::try_from(config).is_err());
            Ok(())
        });
    }

    #[test]
    fn keeps_log_filter_directives() {
        let config = ConfigFile {
            log_level: "relay_node=trace,hyper=info".into(),
            ..ConfigFile::default()
        };
        assert_eq!(config.log_filter(), "relay_node=trace,hyper=info");
    }
}
