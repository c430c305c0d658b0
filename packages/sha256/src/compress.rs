//! SHA-256 compression function (FIPS 180-4 §6.2.2)
//!
//! Mixes one 64-byte block into the running 8-word hash state. The message
//! schedule is kept in a 16-word window indexed modulo 16, so only the words
//! still needed by later rounds are held at any time.

/// Size of one message block in bytes.
pub(crate) const BLOCK_LEN: usize = 64;

/// SHA-256 initial hash value (FIPS 180-4 §5.3.3)
pub(crate) const INITIAL_STATE: [u32; 8] = [
    0x6a09_e667,
    0xbb67_ae85,
    0x3c6e_f372,
    0xa54f_f53a,
    0x510e_527f,
    0x9b05_688c,
    0x1f83_d9ab,
    0x5be0_cd19,
];

// Round constants (FIPS 180-4 §4.2.2)
const K: [u32; 64] = [
    0x428a_2f98, 0x7137_4491, 0xb5c0_fbcf, 0xe9b5_dba5, 0x3956_c25b, 0x59f1_11f1, 0x923f_82a4,
    0xab1c_5ed5, 0xd807_aa98, 0x1283_5b01, 0x2431_85be, 0x550c_7dc3, 0x72be_5d74, 0x80de_b1fe,
    0x9bdc_06a7, 0xc19b_f174, 0xe49b_69c1, 0xefbe_4786, 0x0fc1_9dc6, 0x240c_a1cc, 0x2de9_2c6f,
    0x4a74_84aa, 0x5cb0_a9dc, 0x76f9_88da, 0x983e_5152, 0xa831_c66d, 0xb003_27c8, 0xbf59_7fc7,
    0xc6e0_0bf3, 0xd5a7_9147, 0x06ca_6351, 0x1429_2967, 0x27b7_0a85, 0x2e1b_2138, 0x4d2c_6dfc,
    0x5338_0d13, 0x650a_7354, 0x766a_0abb, 0x81c2_c92e, 0x9272_2c85, 0xa2bf_e8a1, 0xa81a_664b,
    0xc24b_8b70, 0xc76c_51a3, 0xd192_e819, 0xd699_0624, 0xf40e_3585, 0x106a_a070, 0x19a4_c116,
    0x1e37_6c08, 0x2748_774c, 0x34b0_bcb5, 0x391c_0cb3, 0x4ed8_aa4a, 0x5b9c_ca4f, 0x682e_6ff3,
    0x748f_82ee, 0x78a5_636f, 0x84c8_7814, 0x8cc7_0208, 0x90be_fffa, 0xa450_6ceb, 0xbef9_a3f7,
    0xc671_78f2,
];

#[inline(always)]
fn ch(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (!x & z)
}

#[inline(always)]
fn maj(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (x & z) ^ (y & z)
}

#[inline(always)]
fn big_sigma0(x: u32) -> u32 {
    x.rotate_right(2) ^ x.rotate_right(13) ^ x.rotate_right(22)
}

#[inline(always)]
fn big_sigma1(x: u32) -> u32 {
    x.rotate_right(6) ^ x.rotate_right(11) ^ x.rotate_right(25)
}

#[inline(always)]
fn small_sigma0(x: u32) -> u32 {
    x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3)
}

#[inline(always)]
fn small_sigma1(x: u32) -> u32 {
    x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10)
}

/// Load a block as sixteen big-endian words.
#[inline]
fn load_block(block: &[u8]) -> [u32; 16] {
    let mut w = [0u32; 16];
    for (word, bytes) in w.iter_mut().zip(block.chunks_exact(4)) {
        *word = (u32::from(bytes[0]) << 24)
            | (u32::from(bytes[1]) << 16)
            | (u32::from(bytes[2]) << 8)
            | u32::from(bytes[3]);
    }
    w
}

/// Compress one block into `state`.
///
/// `block` must be exactly [`BLOCK_LEN`] bytes. All additions are modulo 2^32.
pub(crate) fn compress(state: &mut [u32; 8], block: &[u8]) {
    debug_assert_eq!(block.len(), BLOCK_LEN);
    let mut w = load_block(block);

    // Working variables a..h live at indices 0..8. Each round writes the new
    // `e` into slot 3 and the new `a` into slot 7, then rotates the array by
    // one so every variable shifts down a letter.
    let mut v = *state;

    for (i, k) in K.iter().enumerate() {
        let wi = if i < 16 {
            w[i]
        } else {
            let expanded = small_sigma1(w[(i - 2) & 15])
                .wrapping_add(w[(i - 7) & 15])
                .wrapping_add(small_sigma0(w[(i - 15) & 15]))
                .wrapping_add(w[i & 15]);
            w[i & 15] = expanded;
            expanded
        };

        let t1 = v[7]
            .wrapping_add(big_sigma1(v[4]))
            .wrapping_add(ch(v[4], v[5], v[6]))
            .wrapping_add(*k)
            .wrapping_add(wi);
        let t2 = big_sigma0(v[0]).wrapping_add(maj(v[0], v[1], v[2]));

        v[3] = v[3].wrapping_add(t1);
        v[7] = t1.wrapping_add(t2);
        v.rotate_right(1);
    }

    for (s, x) in state.iter_mut().zip(v) {
        *s = s.wrapping_add(x);
    }
}
