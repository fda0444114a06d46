use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;
use gumdrop::Options;
use serde::Serialize;

use azmorph::dawg::TypoBudget;
use azmorph::{loader, Morph, Parse, ParseSummary, ParserConfig};

trait OutputWriter {
    fn write_parses(&mut self, word: &str, parses: &[Parse]);
    fn finish(&mut self);
}

struct StdoutWriter;

impl OutputWriter for StdoutWriter {
    fn write_parses(&mut self, word: &str, parses: &[Parse]) {
        println!("Input: {}\t\t[{} parses]", word, parses.len());
        for parse in parses {
            let parser = parse.parser().map(|p| p.to_string()).unwrap_or_default();
            println!(
                "{}\t\t{}\t\t{:.6}\t\t{}",
                parse,
                parse.tag(),
                parse.score(),
                parser
            );
        }
        println!();
    }

    fn finish(&mut self) {}
}

#[derive(Serialize)]
struct ParseRequest {
    word: String,
    parses: Vec<ParseSummary>,
}

#[derive(Serialize)]
struct JsonWriter {
    results: Vec<ParseRequest>,
}

impl JsonWriter {
    pub fn new() -> JsonWriter {
        JsonWriter { results: vec![] }
    }
}

impl OutputWriter for JsonWriter {
    fn write_parses(&mut self, word: &str, parses: &[Parse]) {
        self.results.push(ParseRequest {
            word: word.to_owned(),
            parses: parses.iter().map(Parse::summary).collect(),
        });
    }

    fn finish(&mut self) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("{:?}", e),
        }
    }
}

#[derive(Debug, Options)]
struct Args {
    #[options(help = "print help message")]
    help: bool,

    #[options(command)]
    command: Option<Command>,
}

#[derive(Debug, Options)]
enum Command {
    #[options(help = "print the parses of provided input")]
    Parse(ParseArgs),

    #[options(help = "print every form of each parse of provided input")]
    Inflect(InflectArgs),
}

#[derive(Debug, Options)]
struct ParseArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(no_short, long = "json", help = "output in JSON format")]
    use_json: bool,

    #[options(free, help = "words to be processed")]
    inputs: Vec<String>,

    #[options(no_short, help = "dictionary directory to be used", required)]
    dict: PathBuf,

    #[options(no_short, help = "how to read the dictionary: fs or memory")]
    loader: Option<String>,

    #[options(no_short, help = "JSON file with parser configuration")]
    config: Option<PathBuf>,

    #[options(short = "i", long = "ignore-case", help = "accept words in any letter case")]
    ignore_case: bool,

    #[options(help = "typo repairs per word, a number or \"auto\"")]
    typos: Option<String>,

    #[options(no_short, help = "doubled letter repairs per word")]
    stutter: Option<u32>,

    #[options(short = "f", help = "return an unknown-word parse instead of nothing")]
    force: bool,

    #[options(short = "n", help = "normalize scores to sum to one")]
    normalize: bool,
}

#[derive(Debug, Options)]
struct InflectArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(free, help = "words to be processed")]
    inputs: Vec<String>,

    #[options(no_short, help = "dictionary directory to be used", required)]
    dict: PathBuf,

    #[options(no_short, help = "how to read the dictionary: fs or memory")]
    loader: Option<String>,

    #[options(no_short, help = "JSON file with parser configuration")]
    config: Option<PathBuf>,
}

fn parse_typos(value: &str) -> anyhow::Result<TypoBudget> {
    if value == "auto" {
        return Ok(TypoBudget::Auto);
    }

    let n = value
        .parse::<u32>()
        .with_context(|| format!("invalid typo budget: {}", value))?;
    Ok(TypoBudget::Fixed(n))
}

fn read_config(path: Option<&Path>) -> anyhow::Result<ParserConfig> {
    match path {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("cannot open {}", path.display()))?;
            let config = serde_json::from_reader(file)
                .with_context(|| format!("invalid configuration in {}", path.display()))?;
            Ok(config)
        }
        None => Ok(ParserConfig::default()),
    }
}

fn load_morph(dict: &Path, loader_name: Option<&str>, config: ParserConfig) -> anyhow::Result<Morph> {
    let kind = loader::select(loader_name.unwrap_or("fs"))?;
    let thesaurus = kind
        .load(dict)
        .with_context(|| format!("cannot load dictionary {}", dict.display()))?;

    let mut morph = Morph::from_thesaurus(thesaurus)?;
    morph.set_config(config);
    Ok(morph)
}

fn read_words(inputs: Vec<String>) -> anyhow::Result<Vec<String>> {
    if !inputs.is_empty() {
        return Ok(inputs);
    }

    eprintln!("Reading from stdin...");
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("reading stdin")?;

    Ok(buffer
        .split_whitespace()
        .map(|x| x.to_string())
        .collect())
}

fn parse(args: ParseArgs) -> anyhow::Result<()> {
    let mut config = read_config(args.config.as_deref())?;

    if args.ignore_case {
        config.ignore_case = true;
    }

    if let Some(typos) = args.typos.as_deref() {
        config.typos = parse_typos(typos)?;
    }

    if args.stutter.is_some() {
        config.stutter = args.stutter;
    }

    if args.force {
        config.force_parse = true;
    }

    if args.normalize {
        config.normalize_score = true;
    }

    let morph = load_morph(&args.dict, args.loader.as_deref(), config)?;

    let mut writer: Box<dyn OutputWriter> = if args.use_json {
        Box::new(JsonWriter::new())
    } else {
        Box::new(StdoutWriter)
    };

    for word in read_words(args.inputs)? {
        let parses = morph.parse(&word)?;
        writer.write_parses(&word, &parses);
    }

    writer.finish();

    Ok(())
}

fn inflect(args: InflectArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_deref())?;
    let morph = load_morph(&args.dict, args.loader.as_deref(), config)?;

    for word in read_words(args.inputs)? {
        for parse in morph.parse(&word)? {
            println!("{} ({})", parse, parse.tag());
            for form in parse.lexeme() {
                println!("\t{}\t\t{}", form, form.tag());
            }
        }
        println!();
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let args = Args::parse_args_default_or_exit();

    match args.command {
        None => Ok(()),
        Some(Command::Parse(args)) => parse(args),
        Some(Command::Inflect(args)) => inflect(args),
    }
}
