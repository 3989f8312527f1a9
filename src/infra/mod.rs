pub mod csv_output_adapter;
pub mod http_client;
pub mod workbook_reader;
