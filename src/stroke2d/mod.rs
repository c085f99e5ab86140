pub mod stroke2d;
