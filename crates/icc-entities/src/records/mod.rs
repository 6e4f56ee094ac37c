pub mod sim_records;
