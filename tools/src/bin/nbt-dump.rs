use std::fs::File;
use std::io::{self, BufReader, Read};

use clap::{App, Arg, ArgMatches};
use env_logger::Env;
use flate2::read::{GzDecoder, ZlibDecoder};
use log::error;
use pullnbt::stream::{Event, Parser};
use pullnbt::ReaderFactory;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn open(args: &ArgMatches) -> Result<Box<dyn Read>> {
    let input: Box<dyn Read> = match args.value_of("file") {
        Some("-") | None => Box::new(io::stdin()),
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
    };

    Ok(if args.is_present("gzip") {
        Box::new(GzDecoder::new(input))
    } else if args.is_present("zlib") {
        Box::new(ZlibDecoder::new(input))
    } else {
        input
    })
}

fn factory(args: &ArgMatches) -> Result<ReaderFactory> {
    let mut config = vec![];
    if let Some(depth) = args.value_of("max-depth") {
        config.push(("max_depth", depth));
    }
    if let Some(len) = args.value_of("max-seq-len") {
        config.push(("max_seq_len", len));
    }
    Ok(ReaderFactory::from_config(config)?)
}

fn dump_events<R: Read>(mut parser: Parser<R>) -> Result<()> {
    while parser.has_next() {
        let event = parser.next()?;
        let indent = parser.location().depth * 4;

        match event {
            Event::TagId | Event::ListTagId => {
                println!("{:indent$}{:?} {:?}", "", event, parser.tag()?, indent = indent)
            }
            Event::TagName | Event::ValueString => {
                println!("{:indent$}{:?} {:?}", "", event, parser.string()?, indent = indent)
            }
            Event::ValueNumber | Event::ArraySize => {
                println!("{:indent$}{:?} {}", "", event, parser.number()?, indent = indent)
            }
        }
    }
    Ok(())
}

fn run(args: &ArgMatches) -> Result<()> {
    let input = open(args)?;
    let factory = factory(args)?;

    if args.is_present("json") {
        let doc = factory.create_reader(input).read()?;
        serde_json::to_writer_pretty(io::stdout(), &doc)?;
        println!();
        Ok(())
    } else {
        dump_events(factory.create_parser(input))
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let matches = App::new("nbt-dump")
        .about("Print the events of an NBT file, or the whole document as JSON")
        .arg(
            Arg::with_name("file")
                .takes_value(true)
                .required(true)
                .help("NBT file to read, - for stdin"),
        )
        .arg(
            Arg::with_name("gzip")
                .long("gzip")
                .takes_value(false)
                .conflicts_with("zlib"),
        )
        .arg(Arg::with_name("zlib").long("zlib").takes_value(false))
        .arg(
            Arg::with_name("json")
                .long("json")
                .takes_value(false)
                .help("Build the document and print it as JSON"),
        )
        .arg(
            Arg::with_name("max-depth")
                .long("max-depth")
                .takes_value(true)
                .required(false),
        )
        .arg(
            Arg::with_name("max-seq-len")
                .long("max-seq-len")
                .takes_value(true)
                .required(false),
        )
        .get_matches();

    if let Err(e) = run(&matches) {
        error!("{}", e);
        std::process::exit(1);
    }
}
