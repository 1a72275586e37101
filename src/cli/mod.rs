mod serve;

use serve::serve;

use crate::{Args, config::Config};

pub fn run(args: &Args, config: &Config) -> anyhow::Result<()> {
    serve(&args.manifest, &args.extension_id, config)
}
