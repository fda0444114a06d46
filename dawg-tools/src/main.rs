use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use structopt::StructOpt;

use azmorph::dawg::{self, Dawg, DawgBuilder, Payload, PayloadKind, SuffixStats, WordForms};
use azmorph::vfs::{File, Filesystem, Fs};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "dawg-tools",
    about = "Build and inspect the automata of azmorph dictionaries."
)]
enum Opts {
    #[structopt(about = "Compile a key<TAB>payload TSV file into an automaton")]
    Build {
        #[structopt(parse(from_os_str))]
        input: PathBuf,

        #[structopt(parse(from_os_str))]
        output: PathBuf,

        #[structopt(
            short,
            long,
            default_value = "words",
            help = "payload kind: words, count or suffixes"
        )]
        kind: PayloadKind,
    },

    #[structopt(about = "Print counts for an automaton")]
    Info {
        #[structopt(parse(from_os_str))]
        path: PathBuf,

        #[structopt(long, help = "output in JSON format")]
        json: bool,
    },

    #[structopt(about = "Print every key and payload of an automaton")]
    Dump {
        #[structopt(parse(from_os_str))]
        path: PathBuf,
    },
}

fn build<V: Payload>(input: &Path, output: &Path) -> anyhow::Result<()> {
    let file = std::fs::File::open(input)
        .with_context(|| format!("cannot open {}", input.display()))?;

    let mut builder = DawgBuilder::<V>::new();

    for (n, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }

        let (key, text) = match line.split_once('\t') {
            Some(v) => v,
            None => bail!("line {}: expected key<TAB>payload", n + 1),
        };

        let value = match V::parse_text(text) {
            Some(v) => v,
            None => bail!("line {}: invalid {} payload {:?}", n + 1, V::KIND, text),
        };

        if builder.insert(key, value).is_some() {
            log::warn!("line {}: duplicate key {:?}", n + 1, key);
        }
    }

    println!("Compiling {} keys...", builder.len());
    let dawg = builder.build();

    let mut writer = BufWriter::new(std::fs::File::create(output)?);
    dawg.write_to(&mut writer)?;
    writer.flush()?;

    println!(
        "Wrote {} states and {} transitions to {:?}.",
        dawg.state_count(),
        dawg.transition_count(),
        output
    );

    Ok(())
}

fn summary<V: Payload>(bytes: &[u8]) -> anyhow::Result<serde_json::Value> {
    let dawg = Dawg::<V>::from_bytes(bytes)?;
    Ok(serde_json::json!({
        "payload": V::KIND.to_string(),
        "states": dawg.state_count(),
        "transitions": dawg.transition_count(),
        "values": dawg.value_count(),
        "keys": dawg.entries().len(),
    }))
}

fn info<V: Payload>(bytes: &[u8], json: bool) -> anyhow::Result<()> {
    let summary = summary::<V>(bytes)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    for field in &["payload", "states", "transitions", "values", "keys"] {
        let value = &summary[*field];
        match value.as_str() {
            Some(s) => println!("{:<12} {}", format!("{}:", field), s),
            None => println!("{:<12} {}", format!("{}:", field), value),
        }
    }

    Ok(())
}

fn dump<V: Payload>(bytes: &[u8]) -> anyhow::Result<()> {
    let dawg = Dawg::<V>::from_bytes(bytes)?;
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for (key, value) in dawg.entries() {
        writeln!(out, "{}\t{}", key, value.to_text())?;
    }

    out.flush()?;
    Ok(())
}

fn read(path: &Path) -> anyhow::Result<(PayloadKind, azmorph::vfs::Contents)> {
    let mut file = Fs
        .open(path)
        .with_context(|| format!("cannot open {}", path.display()))?;
    let contents = file.contents()?;
    let kind = dawg::payload_kind(&contents)?;
    Ok((kind, contents))
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let opts = Opts::from_args();

    match opts {
        Opts::Build {
            input,
            output,
            kind,
        } => match kind {
            PayloadKind::WordForms => build::<WordForms>(&input, &output),
            PayloadKind::Count => build::<u32>(&input, &output),
            PayloadKind::SuffixStats => build::<SuffixStats>(&input, &output),
        },
        Opts::Info { path, json } => {
            let (kind, bytes) = read(&path)?;
            match kind {
                PayloadKind::WordForms => info::<WordForms>(&bytes, json),
                PayloadKind::Count => info::<u32>(&bytes, json),
                PayloadKind::SuffixStats => info::<SuffixStats>(&bytes, json),
            }
        }
        Opts::Dump { path } => {
            let (kind, bytes) = read(&path)?;
            match kind {
                PayloadKind::WordForms => dump::<WordForms>(&bytes),
                PayloadKind::Count => dump::<u32>(&bytes),
                PayloadKind::SuffixStats => dump::<SuffixStats>(&bytes),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts() {
        let mut builder = DawgBuilder::<u32>::new();
        builder.insert("дом", 3);
        builder.insert("дома", 5);

        let mut bytes = vec![];
        builder.build().write_to(&mut bytes).unwrap();

        let summary = summary::<u32>(&bytes).unwrap();
        assert_eq!(summary["payload"], "count");
        assert_eq!(summary["keys"], 2);
        assert_eq!(summary["values"], 2);
        assert_eq!(summary["states"], 5);

        assert!(super::summary::<WordForms>(&bytes).is_err());
    }
}
