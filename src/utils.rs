use ibig::{UBig, ubig};

pub fn isqrt_u64(n: u64) -> u64 {
    if n < 2 {
        return n;
    }
    let bits = 64 - n.leading_zeros();
    let mut y = 1u64 << (bits / 2 + 1);
    loop {
        let z = (y + n / y) / 2;
        if z >= y {
            return y;
        }
        y = z;
    }
}

pub fn is_square(n: u64) -> bool {
    let r = isqrt_u64(n);
    r * r == n
}

/// floor(sqrt(x)), Newton's method started above the root.
pub fn isqrt(x: &UBig) -> UBig {
    if x < &ubig!(2) {
        return x.clone();
    }
    let mut y = ubig!(1) << (x.bit_len() / 2 + 1);
    loop {
        let z = (&y + x / &y) >> 1;
        if z >= y {
            return y;
        }
        y = z;
    }
}

pub fn is_square_ubig(x: &UBig) -> bool {
    let r = isqrt(x);
    &(&r * &r) == x
}
