pub mod allocation_writer;
pub mod bill_reader;
