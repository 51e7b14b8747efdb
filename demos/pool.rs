use stridepool::{pool2d, PaddingScope, PoolConfig, PoolMode, Tensor};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let a = Tensor::arange(0.0, 16.0, 1.0)?.view(&[1, 4, 4, 1])?;
    println!("{a}");

    for mode in ["max", "avg"] {
        let pooled = pool2d(&a, 2, 2, 0, mode)?;
        println!("{mode}\n{pooled}");
    }

    let config = PoolConfig::new(3, 1, 1, PoolMode::Avg).with_padding_scope(PaddingScope::AllAxes);
    let padded = a.pool_2d(&config)?;
    println!("{config:?}\n{padded:?}");

    Ok(())
}
