#![no_main]

use libfuzzer_sys::fuzz_target;
use mmr_db_fuzz::ArbitraryOp;

fuzz_target!(|input: (Vec<ArbitraryOp>, u16, u16)| {
	mmr_db_fuzz::fuzz_evaluate(input.0, input.1, input.2);
});
