use std::io::Write;

use crate::{config::Config, listing, page::BackupPage};

pub struct CommandHandler {
    config: Config,
}

impl CommandHandler {
    pub fn new(config: Config) -> Self {
        CommandHandler { config }
    }

    /// Builds the backup page. Listing errors end up inside the page.
    pub async fn build_page(&self) -> BackupPage {
        let result = listing::list_backups(&self.config).await;
        BackupPage::from_result(self.config.bucket(), result)
    }

    pub async fn handle_list<W: Write>(&self, json: bool, out: &mut W) -> eyre::Result<()> {
        let page = self.build_page().await;

        if json {
            writeln!(out, "{}", page.to_json()?)?;
        } else {
            write!(out, "{}", page)?;
        }

        Ok(())
    }
}
