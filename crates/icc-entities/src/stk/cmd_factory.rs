use icc_core::IccErr;
use icc_pdus::stk::enums::command_type::StkCommandType;
use icc_pdus::stk::enums::result_code::StkResultCode;
use icc_pdus::stk::fields::command_details::CommandDetails;
use icc_pdus::stk::fields::stk_value::{StkDuration, StkFileList, StkIconId, StkItem, StkValue};
use icc_pdus::stk::pdus::stk_command::{
    STK_REFRESH_FILE_CHANGE, STK_REFRESH_NAA_INIT_AND_FILE_CHANGE, StkBrowser, StkCommand, StkCommandParams,
    StkDisplayText, StkInput, StkMenu, StkPlayTone, StkRefresh, StkSetUpCall, StkTextMessage, StkTimer,
};
use icc_pdus::stk::pdus::terminal_response::TerminalResponse;
use icc_pdus::tlv::comprehension_tlv::{ComprehensionTlv, search_all, search_for_tag};
use icc_pdus::tlv::enums::comprehension_tag::ComprehensionTag;

/// A command the card sent that cannot be handed to the user layer
#[derive(Debug, Clone, PartialEq)]
pub struct CommandRejected {
    pub details: CommandDetails,
    /// Result for the terminal response answering the command
    pub result: StkResultCode,
    pub error: IccErr,
}

impl CommandRejected {
    fn missing(details: CommandDetails, tag: ComprehensionTag) -> Self {
        tracing::warn!("{} lacks mandatory {}", details, tag);
        CommandRejected {
            details,
            result: StkResultCode::RequiredValuesMissing,
            error: IccErr::RequiredValueMissing { command: details.type_of_command },
        }
    }

    pub fn terminal_response(&self) -> TerminalResponse {
        TerminalResponse::new(self.details, self.result)
    }
}

fn value(chain: &[ComprehensionTlv], tag: ComprehensionTag) -> Option<&StkValue> {
    search_for_tag(chain, tag).map(|c| &c.value)
}

fn alpha_id(chain: &[ComprehensionTlv]) -> Option<String> {
    match value(chain, ComprehensionTag::AlphaId) {
        Some(StkValue::AlphaId(alpha)) => Some(alpha.clone()),
        _ => None,
    }
}

fn duration(chain: &[ComprehensionTlv]) -> Option<StkDuration> {
    match value(chain, ComprehensionTag::Duration) {
        Some(StkValue::Duration(duration)) => Some(*duration),
        _ => None,
    }
}

fn icon(chain: &[ComprehensionTlv]) -> Option<StkIconId> {
    match value(chain, ComprehensionTag::IconId) {
        Some(StkValue::IconId(icon)) => *icon,
        _ => None,
    }
}

/// Text of a Text String or Default Text object. Null and empty strings give "".
fn text_string(chain: &[ComprehensionTlv], tag: ComprehensionTag) -> Option<String> {
    match value(chain, tag) {
        Some(StkValue::TextString(text)) => Some(text.text.clone().unwrap_or_default()),
        _ => None,
    }
}

fn text_message(chain: &[ComprehensionTlv]) -> StkTextMessage {
    StkTextMessage { text: alpha_id(chain), icon: icon(chain) }
}

/// Decode the typed parameters of one proactive command. Ok(None) when there is nothing
/// for the user layer to act on.
pub fn build_command(details: CommandDetails, chain: &[ComprehensionTlv]) -> Result<Option<StkCommand>, CommandRejected> {
    let Some(command_type) = details.command_type() else {
        tracing::warn!("unknown proactive command type 0x{:02x}", details.type_of_command);
        return Ok(None);
    };
    let qualifier = details.qualifier;
    tracing::debug!("building {} qualifier 0x{:02x}", command_type, qualifier);

    let params = match command_type {
        StkCommandType::Refresh => {
            let file_list = if qualifier == STK_REFRESH_FILE_CHANGE || qualifier == STK_REFRESH_NAA_INIT_AND_FILE_CHANGE {
                match value(chain, ComprehensionTag::FileList) {
                    Some(StkValue::FileList(list)) => Some(list.clone()),
                    _ => None,
                }
            } else {
                None
            };
            StkCommandParams::Refresh(StkRefresh { refresh_type: qualifier, file_list })
        }
        StkCommandType::PollInterval => match duration(chain) {
            Some(duration) => StkCommandParams::PollInterval(duration),
            None => return Err(CommandRejected::missing(details, ComprehensionTag::Duration)),
        },
        StkCommandType::PollingOff => StkCommandParams::PollOff,
        StkCommandType::SetUpEventList => match value(chain, ComprehensionTag::EventList) {
            Some(StkValue::EventList(events)) => StkCommandParams::SetUpEventList(events.clone()),
            _ => return Err(CommandRejected::missing(details, ComprehensionTag::EventList)),
        },
        StkCommandType::SetUpCall => StkCommandParams::SetUpCall(set_up_call(details, chain)?),
        StkCommandType::SendSs | StkCommandType::SendUssd | StkCommandType::SendSms | StkCommandType::SendDtmf => {
            let message = text_message(chain);
            if message.text.as_deref() == Some("") {
                tracing::debug!("{} with empty alpha identifier, nothing to show", command_type);
                return Ok(None);
            }
            StkCommandParams::EventNotify(message)
        }
        StkCommandType::LaunchBrowser => {
            let url = match value(chain, ComprehensionTag::Url) {
                Some(StkValue::Url(url)) => url.clone(),
                _ => return Err(CommandRejected::missing(details, ComprehensionTag::Url)),
            };
            let confirm_message = alpha_id(chain).map(|_| text_message(chain));
            StkCommandParams::LaunchBrowser(StkBrowser { mode: qualifier & 0x03, url, confirm_message })
        }
        StkCommandType::PlayTone => StkCommandParams::PlayTone(StkPlayTone {
            is_vibrate: qualifier & 0x01 != 0,
            text: alpha_id(chain),
            tone: match value(chain, ComprehensionTag::Tone) {
                Some(StkValue::Tone(tone)) => Some(*tone),
                _ => None,
            },
            duration: duration(chain),
            icon: icon(chain),
        }),
        StkCommandType::DisplayText => StkCommandParams::DisplayText(display_text(details, chain)?),
        StkCommandType::GetInkey => {
            let Some(text) = text_string(chain, ComprehensionTag::TextString) else {
                return Err(CommandRejected::missing(details, ComprehensionTag::TextString));
            };
            StkCommandParams::GetInkey(StkInput {
                text,
                min_length: 1,
                max_length: 1,
                is_alphabet: qualifier & 0x01 != 0,
                is_ucs2: qualifier & 0x02 != 0,
                is_yes_no_requested: qualifier & 0x04 != 0,
                hide_input: false,
                is_packed: false,
                is_help_available: qualifier & 0x80 != 0,
                default_text: None,
                duration: duration(chain),
                icon: icon(chain),
            })
        }
        StkCommandType::GetInput => {
            let Some(text) = text_string(chain, ComprehensionTag::TextString) else {
                return Err(CommandRejected::missing(details, ComprehensionTag::TextString));
            };
            let (min_length, max_length) = match value(chain, ComprehensionTag::ResponseLength) {
                Some(StkValue::ResponseLength { min, max }) => (*min, *max),
                _ => return Err(CommandRejected::missing(details, ComprehensionTag::ResponseLength)),
            };
            StkCommandParams::GetInput(StkInput {
                text,
                min_length,
                max_length,
                is_alphabet: qualifier & 0x01 != 0,
                is_ucs2: qualifier & 0x02 != 0,
                is_yes_no_requested: false,
                hide_input: qualifier & 0x04 != 0,
                is_packed: qualifier & 0x08 != 0,
                is_help_available: qualifier & 0x80 != 0,
                default_text: text_string(chain, ComprehensionTag::DefaultText),
                duration: duration(chain),
                icon: icon(chain),
            })
        }
        StkCommandType::SelectItem => {
            let mut menu = menu(details, chain)?;
            menu.presentation_type = Some(qualifier & 0x03);
            StkCommandParams::SelectItem(menu)
        }
        StkCommandType::SetUpMenu => StkCommandParams::SetUpMenu(menu(details, chain)?),
        StkCommandType::ProvideLocalInfo => StkCommandParams::ProvideLocalInfo { local_info_type: qualifier },
        StkCommandType::TimerManagement => {
            let timer_id = match value(chain, ComprehensionTag::TimerIdentifier) {
                Some(StkValue::TimerId(id)) => *id,
                _ => return Err(CommandRejected::missing(details, ComprehensionTag::TimerIdentifier)),
            };
            let timer_value = match value(chain, ComprehensionTag::TimerValue) {
                Some(StkValue::TimerValue(seconds)) => Some(*seconds),
                _ => None,
            };
            StkCommandParams::TimerManagement(StkTimer { timer_action: qualifier, timer_id, timer_value })
        }
        StkCommandType::SetUpIdleModeText => {
            let Some(text) = text_string(chain, ComprehensionTag::TextString) else {
                return Err(CommandRejected::missing(details, ComprehensionTag::TextString));
            };
            StkCommandParams::SetUpIdleModeText { text, icon: icon(chain) }
        }
        StkCommandType::OpenChannel
        | StkCommandType::CloseChannel
        | StkCommandType::ReceiveData
        | StkCommandType::SendData => StkCommandParams::Bip(text_message(chain)),
        StkCommandType::MoreTime => {
            tracing::debug!("no parameters to build for {}", command_type);
            return Ok(None);
        }
    };
    Ok(Some(StkCommand { details, params }))
}

fn set_up_call(details: CommandDetails, chain: &[ComprehensionTlv]) -> Result<StkSetUpCall, CommandRejected> {
    let address = match value(chain, ComprehensionTag::Address) {
        Some(StkValue::Address(address)) => address.clone(),
        _ => return Err(CommandRejected::missing(details, ComprehensionTag::Address)),
    };
    let alphas = search_all(chain, ComprehensionTag::AlphaId);
    let icons = search_all(chain, ComprehensionTag::IconId);
    let message = |i: usize| {
        let text = match alphas.get(i).map(|c| &c.value) {
            Some(StkValue::AlphaId(alpha)) => alpha.clone(),
            _ => return None,
        };
        let icon = match icons.get(i).map(|c| &c.value) {
            Some(StkValue::IconId(icon)) => *icon,
            _ => None,
        };
        Some(StkTextMessage { text: Some(text), icon })
    };
    Ok(StkSetUpCall { address, confirm_message: message(0), call_message: message(1), duration: duration(chain) })
}

fn display_text(details: CommandDetails, chain: &[ComprehensionTlv]) -> Result<StkDisplayText, CommandRejected> {
    let Some(text) = text_string(chain, ComprehensionTag::TextString) else {
        return Err(CommandRejected::missing(details, ComprehensionTag::TextString));
    };
    if text.is_empty() {
        tracing::warn!("{} with empty text", details);
        return Err(CommandRejected {
            details,
            result: StkResultCode::CommandDataNotUnderstood,
            error: IccErr::CommandDataNotUnderstood,
        });
    }
    Ok(StkDisplayText {
        text,
        is_high_priority: details.qualifier & 0x01 != 0,
        user_clear: details.qualifier & 0x80 != 0,
        response_needed: value(chain, ComprehensionTag::ImmediateResponse).is_none(),
        duration: duration(chain),
        icon: icon(chain),
    })
}

fn menu(details: CommandDetails, chain: &[ComprehensionTlv]) -> Result<StkMenu, CommandRejected> {
    let items: Vec<Option<StkItem>> = search_all(chain, ComprehensionTag::Item)
        .into_iter()
        .filter_map(|c| match &c.value {
            StkValue::Item(item) => Some(item.clone()),
            _ => None,
        })
        .collect();
    if items.is_empty() {
        return Err(CommandRejected::missing(details, ComprehensionTag::Item));
    }
    let default_item = match value(chain, ComprehensionTag::ItemId) {
        Some(StkValue::ItemId(id)) => id.checked_sub(1),
        _ => None,
    };
    let next_action_list = match value(chain, ComprehensionTag::NextActionIndicator) {
        Some(StkValue::NextActionList(list)) => Some(list.clone()),
        _ => None,
    };
    let item_icons = match value(chain, ComprehensionTag::IconIdList) {
        Some(StkValue::IconIdList(Some(list))) => Some((list.qualifier, list.identifiers.clone())),
        _ => None,
    };
    Ok(StkMenu {
        title: alpha_id(chain),
        items,
        default_item,
        is_help_available: details.qualifier & 0x80 != 0,
        next_action_list,
        icon: icon(chain),
        item_icons,
        presentation_type: None,
    })
}

/// Files named by a REFRESH file list, each path ending in its file id
pub fn refresh_file_ids(list: &StkFileList) -> Vec<u16> {
    let mut ids = Vec::new();
    let mut path: Vec<u16> = Vec::new();
    for pair in list.files.chunks_exact(2) {
        let id = u16::from_be_bytes([pair[0], pair[1]]);
        if id == 0x3F00 && !path.is_empty() {
            ids.extend(path.last().copied());
            path.clear();
        }
        path.push(id);
    }
    ids.extend(path.last().copied());
    icc_core::assert_warn!(
        ids.len() == list.num_files as usize,
        "file list announces {} files, {} found",
        list.num_files,
        ids.len()
    );
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use icc_core::debug;
    use icc_pdus::tlv::ber_tlv::BerTlv;

    fn build(hex: &str) -> Result<Option<StkCommand>, CommandRejected> {
        let ber = BerTlv::from_hex(hex).unwrap();
        let chain = ber.comprehension_tlvs().unwrap();
        let details = match value(chain, ComprehensionTag::CommandDetails) {
            Some(StkValue::CommandDetails(details)) => *details,
            _ => panic!("no command details"),
        };
        build_command(details, chain)
    }

    #[test]
    fn test_display_text() {
        debug::setup_logging_verbose();
        // DISPLAY TEXT, high priority and user clear, "Toolkit Test 1" in 8-bit
        let command = build("D01A8103012181820281028D0F04546F6F6C6B6974205465737420 31".replace(' ', "").as_str())
            .unwrap()
            .unwrap();
        let StkCommandParams::DisplayText(params) = command.params else {
            panic!("unexpected {:?}", command.params);
        };
        assert_eq!(params.text, "Toolkit Test 1");
        assert!(params.is_high_priority);
        assert!(params.user_clear);
        assert!(params.response_needed);
    }

    #[test]
    fn test_display_text_empty() {
        debug::setup_logging_verbose();
        let rejected = build("D00C8103012180820281028D0104").unwrap_err();
        assert_eq!(rejected.result, StkResultCode::CommandDataNotUnderstood);
        assert_eq!(rejected.error, IccErr::CommandDataNotUnderstood);
    }

    #[test]
    fn test_missing_mandatory() {
        debug::setup_logging_verbose();
        // POLL INTERVAL without duration
        let rejected = build("D009810301030082028182").unwrap_err();
        assert_eq!(rejected.result, StkResultCode::RequiredValuesMissing);
        assert_eq!(rejected.error, IccErr::RequiredValueMissing { command: 0x03 });
        let response = rejected.terminal_response();
        assert_eq!(response.command_details.type_of_command, 0x03);
    }

    #[test]
    fn test_send_sms_empty_alpha() {
        debug::setup_logging_verbose();
        assert_eq!(build("D00B81030113008202818385 00".replace(' ', "").as_str()).unwrap(), None);
        let command = build("D00E810301130082028183850353656E").unwrap().unwrap();
        assert_eq!(
            command.params,
            StkCommandParams::EventNotify(StkTextMessage { text: Some("Sen".to_string()), icon: None })
        );
    }

    #[test]
    fn test_set_up_menu() {
        debug::setup_logging_verbose();
        // SET UP MENU "Menu" with items 1 "One" and 2 "Two", default item 2
        let command =
            build("D01E8103012580820281828504 4D656E758F04014F6E658F040254776F900102".replace(' ', "").as_str())
                .unwrap()
                .unwrap();
        let StkCommandParams::SetUpMenu(menu) = command.params else {
            panic!("unexpected {:?}", command.params);
        };
        assert_eq!(menu.title.as_deref(), Some("Menu"));
        assert_eq!(menu.items.len(), 2);
        assert_eq!(menu.items[1], Some(StkItem { identifier: 2, text: "Two".to_string() }));
        assert_eq!(menu.default_item, Some(1));
        assert!(menu.is_help_available);
        assert_eq!(menu.presentation_type, None);
    }

    #[test]
    fn test_unknown_command_type() {
        debug::setup_logging_verbose();
        assert_eq!(build("D009810301FE00820281 82".replace(' ', "").as_str()).unwrap(), None);
    }

    #[test]
    fn test_refresh_file_ids() {
        let list = StkFileList { num_files: 2, files: vec![0x3F, 0x00, 0x7F, 0xFF, 0x6F, 0x07, 0x3F, 0x00, 0x2F, 0xE2] };
        assert_eq!(refresh_file_ids(&list), vec![0x6F07, 0x2FE2]);
    }
}
