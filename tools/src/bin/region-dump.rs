use clap::{App, Arg, ArgMatches};
use env_logger::Env;
use log::{error, info, warn};
use pullanvil::{read_chunk, read_header, RegionHeader};
use pullnbt::Document;
use rayon::prelude::*;
use serde_json::json;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn parse_coord(coord: &str) -> Option<(usize, usize)> {
    let mut s = coord.split(',');
    let x: usize = s.next()?.trim().parse().ok()?;
    let z: usize = s.next()?.trim().parse().ok()?;
    Some((x, z))
}

fn summary(header: &RegionHeader, x: usize, z: usize, doc: &Document) -> Result<String> {
    let status = doc
        .root
        .get("Status")
        .and_then(|s| s.as_str())
        .unwrap_or("-");

    Ok(format!(
        "{:>2},{:>2}: {} sectors, modified {}, {} entries, status {}",
        x,
        z,
        header.sectors(x, z)?,
        header.timestamp(x, z)?,
        doc.root.len(),
        status
    ))
}

fn dump_one(data: &[u8], header: &RegionHeader, x: usize, z: usize, as_json: bool) -> Result<()> {
    let doc = read_chunk(data, header, x, z)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        println!("{}", summary(header, x, z, &doc)?);
        for (name, value) in &doc.root {
            println!("    {} {:?}", name, value.tag());
        }
    }
    Ok(())
}

fn dump_all(data: &[u8], header: &RegionHeader, as_json: bool) -> Result<()> {
    let coords: Vec<_> = header.present_chunks().collect();
    info!("{} chunks present", coords.len());

    let chunks: Vec<_> = coords
        .into_par_iter()
        .map(|(x, z)| (x, z, read_chunk(data, header, x, z)))
        .collect();

    let mut failed = 0;
    let mut out = vec![];

    for (x, z, chunk) in chunks {
        match chunk {
            Ok(doc) if as_json => out.push(json!({ "x": x, "z": z, "chunk": doc })),
            Ok(doc) => println!("{}", summary(header, x, z, &doc)?),
            Err(e) => {
                warn!("chunk {},{}: {}", x, z, e);
                failed += 1;
            }
        }
    }

    if as_json {
        println!("{}", serde_json::to_string_pretty(&out)?);
    }
    if failed > 0 {
        warn!("{} chunks could not be read", failed);
    }
    Ok(())
}

fn run(args: &ArgMatches) -> Result<()> {
    let path = args.value_of("region").ok_or("no region file given")?;
    let data = std::fs::read(path)?;
    let header = read_header(&data)?;
    let as_json = args.is_present("json");

    match args.value_of("chunk") {
        Some(coord) => {
            let (x, z) = parse_coord(coord).ok_or("chunk should be given as X,Z")?;
            dump_one(&data, &header, x, z, as_json)
        }
        None => dump_all(&data, &header, as_json),
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let matches = App::new("region-dump")
        .about("Summarise the chunks of a region file, or dump one as JSON")
        .arg(Arg::with_name("region").takes_value(true).required(true))
        .arg(
            Arg::with_name("chunk")
                .long("chunk")
                .takes_value(true)
                .required(false)
                .help("Only read the chunk at X,Z within the region"),
        )
        .arg(Arg::with_name("json").long("json").takes_value(false))
        .get_matches();

    if let Err(e) = run(&matches) {
        error!("{}", e);
        std::process::exit(1);
    }
}
