mod args_test;
mod flow_record_test;
