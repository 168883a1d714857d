mod errors;
mod parser;
mod samples;
