use core::fmt;

use crate::stk::fields::command_details::CommandDetails;
use crate::stk::fields::stk_value::{StkDuration, StkFileList, StkIconId, StkItem};

/// REFRESH qualifier, file change notification
pub const STK_REFRESH_FILE_CHANGE: u8 = 0x01;
/// REFRESH qualifier, NAA initialization and file change notification
pub const STK_REFRESH_NAA_INIT_AND_FILE_CHANGE: u8 = 0x02;

/// Text shown to the user ahead of an action, with its optional icon
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StkTextMessage {
    pub text: Option<String>,
    pub icon: Option<StkIconId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StkRefresh {
    pub refresh_type: u8,
    /// Only for the file change refresh types
    pub file_list: Option<StkFileList>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StkDisplayText {
    pub text: String,
    pub is_high_priority: bool,
    pub user_clear: bool,
    /// Immediate response object absent
    pub response_needed: bool,
    pub duration: Option<StkDuration>,
    pub icon: Option<StkIconId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StkInput {
    pub text: String,
    pub min_length: u8,
    pub max_length: u8,
    pub is_alphabet: bool,
    pub is_ucs2: bool,
    /// GET INKEY only
    pub is_yes_no_requested: bool,
    /// GET INPUT only
    pub hide_input: bool,
    /// GET INPUT only, answer in SMS packed format
    pub is_packed: bool,
    pub is_help_available: bool,
    pub default_text: Option<String>,
    pub duration: Option<StkDuration>,
    pub icon: Option<StkIconId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StkMenu {
    pub title: Option<String>,
    /// The null item removing the menu is kept as None
    pub items: Vec<Option<StkItem>>,
    /// Zero based index of the default item
    pub default_item: Option<u8>,
    pub is_help_available: bool,
    pub next_action_list: Option<Vec<u8>>,
    pub icon: Option<StkIconId>,
    /// Icon qualifier and per item icon identifiers
    pub item_icons: Option<(u8, Vec<u8>)>,
    /// SELECT ITEM only
    pub presentation_type: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StkSetUpCall {
    pub address: String,
    pub confirm_message: Option<StkTextMessage>,
    pub call_message: Option<StkTextMessage>,
    pub duration: Option<StkDuration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StkBrowser {
    /// Qualifier bits 1-2, launch mode
    pub mode: u8,
    pub url: String,
    pub confirm_message: Option<StkTextMessage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StkPlayTone {
    pub is_vibrate: bool,
    pub text: Option<String>,
    pub tone: Option<u8>,
    pub duration: Option<StkDuration>,
    pub icon: Option<StkIconId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StkTimer {
    /// Qualifier: 0 start, 1 deactivate, 2 get current value
    pub timer_action: u8,
    pub timer_id: u8,
    /// Seconds
    pub timer_value: Option<u32>,
}

/// Typed parameters of a proactive command, ready for the user layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StkCommandParams {
    Refresh(StkRefresh),
    PollInterval(StkDuration),
    PollOff,
    /// None is an instruction to remove the current list
    SetUpEventList(Option<Vec<u8>>),
    SetUpCall(StkSetUpCall),
    /// SEND SS, SEND USSD, SEND SMS and SEND DTMF
    EventNotify(StkTextMessage),
    LaunchBrowser(StkBrowser),
    PlayTone(StkPlayTone),
    DisplayText(StkDisplayText),
    GetInkey(StkInput),
    GetInput(StkInput),
    SelectItem(StkMenu),
    SetUpMenu(StkMenu),
    ProvideLocalInfo { local_info_type: u8 },
    TimerManagement(StkTimer),
    SetUpIdleModeText { text: String, icon: Option<StkIconId> },
    /// OPEN CHANNEL, CLOSE CHANNEL, RECEIVE DATA and SEND DATA
    Bip(StkTextMessage),
}

/// A proactive command as delivered to the user layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StkCommand {
    pub details: CommandDetails,
    pub params: StkCommandParams,
}

impl fmt::Display for StkCommand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "StkCommand {{ details: {} params: {:?} }}", self.details, self.params)
    }
}
