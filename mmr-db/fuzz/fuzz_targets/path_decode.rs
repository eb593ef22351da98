#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
	mmr_db_fuzz::fuzz_path_decode(data);
});
