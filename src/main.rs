use nport_holdings::core::config::PipelineConfig;
use nport_holdings::pipeline;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "nport-holdings",
    about = "Extract fund holdings from NPORT-P filings into a spreadsheet"
)]
struct Opt {
    /// Directory containing one <seriesId>.xml filing per fund
    #[structopt(long, default_value = "dataFiles", parse(from_os_str))]
    input_dir: PathBuf,

    /// Path of the spreadsheet to write
    #[structopt(long, default_value = "output.xlsx", parse(from_os_str))]
    output: PathBuf,

    /// JSON file with the fund list; defaults to the built-in list
    #[structopt(long, parse(from_os_str))]
    funds: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let funds = match &opt.funds {
        Some(path) => PipelineConfig::load_funds(path)?,
        None => PipelineConfig::default_funds(),
    };

    let config = PipelineConfig::new(funds, opt.input_dir, opt.output);
    pipeline::run(&config)
}
