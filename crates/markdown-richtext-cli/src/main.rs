use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use markdown_richtext_config::Config;
use markdown_richtext_engine::{
    BlockPath, Document, KindTable, SerializeOptions, indent, io, outdent, serialize_with,
};
use std::fs;
use std::path::{Path, PathBuf};

mod view;

#[derive(Parser)]
#[command(name = "markdown-richtext")]
#[command(about = "Convert markdown to and from a normalized rich-text tree")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rewrite a markdown file in canonical form
    Fmt {
        file: PathBuf,
        /// Write the result back instead of printing it
        #[arg(short, long)]
        write: bool,
    },
    /// Print the document tree of a markdown file as JSON
    Tree {
        file: PathBuf,
        /// Output JSON file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render a JSON document tree as markdown
    Render {
        tree: PathBuf,
        /// Extra kind alias, `host=canonical` (e.g. `bulleted=list-item`)
        #[arg(long = "alias", value_name = "HOST=CANONICAL")]
        aliases: Vec<String>,
    },
    /// Nest the list item at a block path under the item before it
    Indent {
        file: PathBuf,
        /// Dotted block path, e.g. `2` or `0.1` inside a quote
        #[arg(short, long)]
        path: BlockPath,
        #[arg(short, long)]
        write: bool,
    },
    /// Move the list item at a block path one level up
    Outdent {
        file: PathBuf,
        #[arg(short, long)]
        path: BlockPath,
        #[arg(short, long)]
        write: bool,
    },
    /// Browse and edit a markdown file in the terminal
    View { file: PathBuf },
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let config = Config::load_or_default().with_context(|| {
        format!(
            "Failed to load config file {}",
            Config::config_path().display()
        )
    })?;
    let options = SerializeOptions {
        indent_width: config.indent_width,
    };

    match cli.command {
        Command::Fmt { file, write } => {
            let document = read(&file)?;
            emit(&file, &serialize_with(&document, &options), write)
        }
        Command::Tree { file, output } => {
            let document = read(&file)?;
            match output {
                Some(output) => io::write_tree(&output, &document)
                    .with_context(|| format!("Failed to write {}", output.display())),
                None => {
                    print!("{}", io::tree_to_string(&document)?);
                    Ok(())
                }
            }
        }
        Command::Render { tree, aliases } => {
            let kinds = kind_table(&config, &aliases)?;
            let document = io::read_tree(&tree, &kinds)
                .with_context(|| format!("Failed to read {}", tree.display()))?;
            print!("{}", serialize_with(&document, &options));
            Ok(())
        }
        Command::Indent { file, path, write } => {
            let document = indent(read(&file)?, &path)
                .with_context(|| format!("Cannot indent {path} in {}", file.display()))?;
            emit(&file, &serialize_with(&document, &options), write)
        }
        Command::Outdent { file, path, write } => {
            let document = outdent(read(&file)?, &path)
                .with_context(|| format!("Cannot outdent {path} in {}", file.display()))?;
            emit(&file, &serialize_with(&document, &options), write)
        }
        Command::View { file } => view::run(file, options),
    }
}

fn read(file: &Path) -> Result<Document> {
    io::read_markdown(file).with_context(|| format!("Failed to read {}", file.display()))
}

fn emit(file: &Path, markdown: &str, write: bool) -> Result<()> {
    if write {
        fs::write(file, markdown).with_context(|| format!("Failed to write {}", file.display()))?;
        log::info!("wrote {}", file.display());
    } else {
        print!("{markdown}");
    }
    Ok(())
}

/// Builds the alias table from the config file plus `--alias` flags. Flags
/// win over config entries with the same host tag.
fn kind_table(config: &Config, flags: &[String]) -> Result<KindTable> {
    let canonical = KindTable::new();
    let flag_pairs = flags
        .iter()
        .map(|flag| {
            flag.split_once('=')
                .ok_or_else(|| anyhow!("Invalid alias '{flag}', expected HOST=CANONICAL"))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut pairs = config
        .kind_aliases
        .iter()
        .map(|(host, target)| (host.as_str(), target.as_str()))
        .chain(flag_pairs);

    pairs.try_fold(KindTable::new(), |table, (host, target)| -> Result<KindTable> {
        let tag = canonical
            .resolve(target)
            .ok_or_else(|| anyhow!("Alias '{host}' points at unknown block kind '{target}'"))?;
        Ok(table.with_alias(host, tag))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use markdown_richtext_engine::BlockTag;

    #[test]
    fn cli_parses_block_paths() {
        let cli = Cli::try_parse_from(["markdown-richtext", "indent", "notes.md", "-p", "0.1"]).unwrap();
        match cli.command {
            Command::Indent { path, write, .. } => {
                assert_eq!(path, BlockPath::new(vec![0, 1]));
                assert!(!write);
            }
            _ => panic!("expected indent"),
        }
    }

    #[test]
    fn cli_rejects_bad_block_path() {
        assert!(Cli::try_parse_from(["markdown-richtext", "outdent", "n.md", "-p", "a.b"]).is_err());
    }

    #[test]
    fn flag_aliases_override_config() {
        let mut config = Config::default();
        config
            .kind_aliases
            .insert("item".into(), "paragraph".into());
        let table = kind_table(&config, &["item=list-item".into()]).unwrap();
        assert_eq!(table.resolve("item"), Some(BlockTag::ListItem));
        assert_eq!(table.resolve("paragraph"), Some(BlockTag::Paragraph));
    }

    #[test]
    fn bad_aliases_are_errors() {
        let config = Config::default();
        assert!(kind_table(&config, &["nope".into()]).is_err());
        assert!(kind_table(&config, &["x=table".into()]).is_err());
    }
}
