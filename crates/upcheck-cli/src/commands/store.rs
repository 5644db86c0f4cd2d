//! Store command implementation.

use crate::cli::StoreArgs;
use crate::error::convert_rejection;
use crate::output::OutputFormatter;
use anyhow::Result;
use upcheck_core::UploadValidator;

pub fn execute(args: &StoreArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let config = args.upload.to_config();
    let staged = super::stage(&args.upload, &config.field_name)?;

    let stored = UploadValidator::new(&staged.host)
        .with_config(config)
        .inspect()
        .into_result()
        .and_then(|upload| upload.save(args.dest_dir.as_deref(), args.name.as_deref()));

    match stored {
        Ok(stored) => formatter.format_stored(&stored),
        Err(rejection) => {
            formatter.format_rejection("store", &rejection);
            Err(convert_rejection(rejection, &args.upload.file))
        }
    }
}
