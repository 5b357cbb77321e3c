use std::{io::Read as _, time::Instant};

use wiki_feed::{
    CommentPolicy, Composer, Config, UnknownNodePolicy,
    events::{Entry, extract_events},
    node::Node,
};

fn usage<T>(err: &'static str) -> anyhow::Result<T> {
    let exe = std::env::args().next().unwrap_or_default();
    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    println!("Usage: {exe} [options] <tree.json>\n");
    println!("Use `-` to read the tree from standard input.\n");
    println!("or, use environment variables:");
    println!("    WIKI_FEED_TREE\n");
    println!("Options:");
    println!("    --base-url <url>: Prefix for internal links");
    println!("        (default: {})", wiki_feed::config::DEFAULT_BASE_URL);
    println!("    --emit-comments: Keep comments in the output");
    println!("    --lenient: Pass unsupported nodes through as text");
    println!("    --tag <markup=name>: Map formatting markup to an HTML tag");
    println!("    --events: Print news items as JSON feed entries\n");
    Err(anyhow::Error::msg(err))
}

fn free_arg(
    args: &mut pico_args::Arguments,
    key: &str,
    err: &'static str,
) -> anyhow::Result<String> {
    if let Some(arg) = args.opt_free_from_str::<String>()? {
        Ok(arg)
    } else if let Ok(arg) = std::env::var(key) {
        Ok(arg)
    } else {
        usage(err)
    }
}

fn parse_tag(arg: &str) -> anyhow::Result<(String, String)> {
    match arg.split_once('=') {
        Some((markup, name)) if !markup.is_empty() && !name.is_empty() => {
            Ok((markup.to_string(), name.to_string()))
        }
        _ => anyhow::bail!("invalid tag mapping '{arg}', expected <markup=name>"),
    }
}

fn read_tree(path: &str) -> anyhow::Result<Node> {
    let input = if path == "-" {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        input
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&input)?)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return usage("Help requested");
    }

    let mut config = Config::default();
    if let Some(base_url) = args.opt_value_from_str::<_, String>("--base-url")? {
        config = config.with_base_url(&base_url);
    }
    if args.contains("--emit-comments") {
        config = config.with_comments(CommentPolicy::Emit);
    }
    if args.contains("--lenient") {
        config = config.with_unknown_nodes(UnknownNodePolicy::Lenient);
    }
    for (markup, name) in args.values_from_fn("--tag", parse_tag)? {
        config = config.with_tag(&markup, &name);
    }
    let events = args.contains("--events");
    let _ = args.contains("--");
    let tree_path = free_arg(&mut args, "WIKI_FEED_TREE", "Missing tree argument")?;

    if !args.finish().is_empty() {
        return usage("Unknown extra arguments passed");
    }

    let time = Instant::now();
    let document = read_tree(&tree_path)?;
    log::debug!("Loaded tree in {:.2?}", time.elapsed());

    let composer = Composer::new(config);
    let time = Instant::now();
    if events {
        let entries = extract_events(&document)
            .iter()
            .map(|event| event.to_entry(&composer))
            .collect::<Result<Vec<Entry>, _>>()?;
        log::debug!("Rendered {} entries in {:.2?}", entries.len(), time.elapsed());
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        let html = composer.compose(&document)?;
        log::debug!("Rendered tree in {:.2?}", time.elapsed());
        println!("{html}");
    }

    Ok(())
}
