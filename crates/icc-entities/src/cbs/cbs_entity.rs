use std::collections::HashMap;

use icc_core::icc_entities::IccEntity;
use icc_core::Sap;
use icc_pdus::cbs::pdus::cb_message::CbMessage;
use icc_saps::cbs::{CbsMessageInd, CbsPageInd};
use icc_saps::{SapMsg, SapMsgInner};

use crate::{IccEntityTrait, MessageQueue};

/// Multi page messages being collected at the same time
const MAX_PENDING_MESSAGES: usize = 16;

/// Joins the pages of multi page GSM messages. Pages belong together when serial number and
/// message identifier match.
#[derive(Debug, Default)]
pub struct CbReassembler {
    pending: HashMap<(u16, u16), Vec<Option<CbMessage>>>,
}

impl CbReassembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Add one decoded page. Returns the complete message once all pages arrived.
    pub fn add_page(&mut self, page: CbMessage) -> Option<CbMessage> {
        if !page.is_multi_page() {
            return Some(page);
        }
        if page.page_index == 0 || page.page_index > page.num_pages {
            tracing::warn!("page {} of {} out of range, message id {}", page.page_index, page.num_pages, page.message_id);
            return None;
        }

        let key = (page.serial.raw, page.message_id);
        if !self.pending.contains_key(&key) && self.pending.len() >= MAX_PENDING_MESSAGES {
            tracing::warn!("{} messages pending, dropping all partial messages", self.pending.len());
            self.pending.clear();
        }
        let pages = self.pending.entry(key).or_insert_with(|| vec![None; page.num_pages as usize]);
        if pages.len() != page.num_pages as usize {
            tracing::debug!("page count of message {} changed to {}, restarting", page.message_id, page.num_pages);
            *pages = vec![None; page.num_pages as usize];
        }
        let index = page.page_index as usize - 1;
        tracing::trace!("page {}/{} of message id {}", page.page_index, page.num_pages, page.message_id);
        pages[index] = Some(page);

        if pages.iter().any(Option::is_none) {
            return None;
        }
        let pages = self.pending.remove(&key)?;
        Self::join(pages.into_iter().flatten().collect())
    }

    fn join(pages: Vec<CbMessage>) -> Option<CbMessage> {
        let mut iter = pages.into_iter();
        let mut message = iter.next()?;
        message.page_index = 1;
        for page in iter {
            if let Some(body) = page.body {
                message.body.get_or_insert_with(String::new).push_str(&body);
            }
            if let Some(data) = page.data {
                message.data.get_or_insert_with(Vec::new).extend(data);
            }
            if message.language.is_none() {
                message.language = page.language;
            }
        }
        Some(message)
    }
}

/// Receives raw cell broadcast pages and delivers complete messages to the user layer
#[derive(Default)]
pub struct CbsEntity {
    reassembler: CbReassembler,
}

impl CbsEntity {
    pub fn new() -> Self {
        Self::default()
    }

    fn rx_page(&mut self, queue: &mut MessageQueue, ind: CbsPageInd) {
        let page = match CbMessage::from_bytes(&ind.pdu) {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("dropping cb page: {}", e);
                return;
            }
        };
        tracing::debug!(
            "cb {} message id {} serial 0x{:04x} page {}/{}",
            page.format, page.message_id, page.serial.raw, page.page_index, page.num_pages
        );
        if let Some(message) = self.reassembler.add_page(page) {
            let msg = SapMsgInner::CbsMessageInd(CbsMessageInd { message });
            queue.push_back(SapMsg::new(Sap::CbsSap, IccEntity::Cbs, IccEntity::User, msg));
        }
    }
}

impl IccEntityTrait for CbsEntity {
    fn entity(&self) -> IccEntity {
        IccEntity::Cbs
    }

    fn rx_prim(&mut self, queue: &mut MessageQueue, message: SapMsg) {
        tracing::debug!("rx_prim: {}", message.msg);
        match message.msg {
            SapMsgInner::CbsPageInd(ind) => self.rx_page(queue, ind),
            other => {
                tracing::warn!("unexpected primitive {} from {:?}", other, message.src);
            }
        }
    }
}
