//! Check command implementation.

use crate::cli::CheckArgs;
use crate::error::convert_rejection;
use crate::output::OutputFormatter;
use anyhow::Result;
use upcheck_core::Inspection;
use upcheck_core::UploadValidator;

pub fn execute(args: &CheckArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let config = args.upload.to_config();
    let staged = super::stage(&args.upload, &config.field_name)?;

    match UploadValidator::new(&staged.host).with_config(config).inspect() {
        Inspection::Accepted(upload) => {
            formatter.format_accepted(upload.request(), upload.extension(), upload.limits())
        }
        Inspection::Rejected(rejection) => {
            formatter.format_rejection("check", &rejection);
            Err(convert_rejection(rejection, &args.upload.file))
        }
    }
}
