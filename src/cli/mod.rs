// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap, hands them to the inspect use
// case and prints what comes back:
//   - batches per role (plain text or JSON)
//   - the feature and label tensors of one training batch
//   - their shapes

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::InspectArgs;

use crate::application::inspect_use_case::InspectUseCase;

#[derive(Parser, Debug)]
#[command(
    name = "cmeson-dataset",
    version,
    about = "Split a selector production into train/val/test and print one padded batch."
)]
pub struct Cli {
    #[command(flatten)]
    pub args: InspectArgs,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let args     = self.args;
        let data_dir = args.data_dir();
        let config   = (&args).into();

        let report = InspectUseCase::new(data_dir, config, args.batch_index).execute()?;
        let s      = &report.summary;

        if args.json {
            println!("{}", serde_json::to_string_pretty(s)?);
        } else {
            println!("Train Set : {}", s.train_batches);
            println!("Val Set : {}", s.val_batches);
            println!("Test Set : {}", s.test_batches);
        }

        let x = &report.batch.features;
        let y = &report.batch.labels;
        println!("Batch {}:", report.batch_index);
        println!("{x}");
        println!("{y}");
        println!("{:?} {:?}", x.dims(), y.dims());

        Ok(())
    }
}
