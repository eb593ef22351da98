#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (u8, u8, u8)| {
	mmr_db_fuzz::fuzz_proof_roundtrip(input.0, input.1, input.2);
});
