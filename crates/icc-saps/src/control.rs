use icc_core::{CardAppType, FileId};

#[derive(Debug)]
pub enum IccControl {
    /// Another card application was selected. Cached descriptors and free record hints are stale.
    SwitchApp(CardAppType),
    /// The card changed these files (STK REFRESH). An empty list means all files.
    FilesChanged(Vec<FileId>),
}
