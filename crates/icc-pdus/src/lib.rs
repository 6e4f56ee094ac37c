#![allow(dead_code)]

//! Codecs for the PDUs and records exchanged with an ICC: SMS TPDUs, cell broadcast pages,
//! EF records of the SIM/USIM/RUIM/ISIM applications, BER-TLV and COMPREHENSION-TLV objects
//! and the STK values carried in them.

pub mod pdu_message;

pub mod sms {
    pub mod enums {
        pub mod message_class;
        pub mod message_type_indicator;
        pub mod sms_encoding;
        pub mod type_of_number;
    }
    pub mod fields {
        pub mod data_coding_scheme;
        pub mod protocol_identifier;
        pub mod sms_address;
        pub mod sms_timestamp;
        pub mod user_data;
        pub mod user_data_header;
    }
    pub mod pdus {
        pub mod sms_deliver;
        pub mod sms_message;
        pub mod sms_status_report;
        pub mod sms_submit;
    }
}

pub mod cbs {
    pub mod enums {
        pub mod etws_warning_type;
        pub mod geographical_scope;
    }
    pub mod fields {
        pub mod cb_data_coding_scheme;
        pub mod cb_serial_number;
        pub mod etws_info;
        pub mod wac_data;
    }
    pub mod pdus {
        pub mod cb_message;
        pub mod etws_primary_notification;
        pub mod gsm_cb_message;
        pub mod umts_cb_message;
    }
}

pub mod icc {
    pub mod ef_ids;
    pub mod enums {
        pub mod ef_structure;
        pub mod icc_command;
        pub mod pbr_file_type;
    }
    pub mod fields {
        pub mod alpha_identifier;
        pub mod dialling_number;
        pub mod file_descriptor;
        pub mod network_name;
        pub mod plmn;
    }
    pub mod records {
        pub mod admin_data;
        pub mod adn_record;
        pub mod anr_record;
        pub mod cb_identifiers;
        pub mod cfis;
        pub mod cphs;
        pub mod email_record;
        pub mod ext_record;
        pub mod icc_contact;
        pub mod iccid;
        pub mod img;
        pub mod isim;
        pub mod mwis;
        pub mod opl;
        pub mod pbr;
        pub mod pnn;
        pub mod service_table;
        pub mod sim_phase;
        pub mod sms_record;
        pub mod spdi;
        pub mod spn;
    }
}

pub mod tlv {
    pub mod enums {
        pub mod ber_tag;
        pub mod comprehension_tag;
        pub mod fcp_tag;
    }
    pub mod ber_tlv;
    pub mod comprehension_tlv;
    pub mod tlv_writer;
}

pub mod stk {
    pub mod enums {
        pub mod command_type;
        pub mod device_id;
        pub mod result_code;
    }
    pub mod fields {
        pub mod command_details;
        pub mod stk_value;
        pub mod text_string;
    }
    pub mod pdus {
        pub mod stk_command;
        pub mod terminal_response;
    }
}

pub use pdu_message::PduMessage;
