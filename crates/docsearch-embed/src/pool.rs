use anyhow::Result;
use candle_core::{DType, Tensor};

/// How token states collapse into one sentence vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pooling {
    /// First token state. BGE-M3 dense vectors are produced this way.
    #[default]
    Cls,
    /// Mean over unmasked tokens.
    Mean,
}

pub fn pool_l2(pooling: Pooling, hidden: &Tensor, attention_mask: &Tensor) -> Result<Tensor> {
    match pooling {
        Pooling::Cls => cls_l2(hidden),
        Pooling::Mean => masked_mean_l2(hidden, attention_mask),
    }
}

pub fn cls_l2(hidden: &Tensor) -> Result<Tensor> {
    let dims = hidden.dims();
    anyhow::ensure!(dims.len() == 3, "hidden shape must be [B,T,H], got {:?}", dims);
    let cls = hidden.narrow(1, 0, 1)?.squeeze(1)?;
    l2_normalize(&cls)
}

pub fn masked_mean_l2(hidden: &Tensor, attention_mask: &Tensor) -> Result<Tensor> {
    let dims = hidden.dims();
    anyhow::ensure!(dims.len() == 3, "hidden shape must be [B,T,H], got {:?}", dims);
    let mask = attention_mask.to_device(hidden.device())?.to_dtype(hidden.dtype())?;
    let mask_broadcast = mask.unsqueeze(2)?.broadcast_as(hidden.shape())?;
    let sum = (hidden * &mask_broadcast)?.sum(1)?;
    let lengths = mask.sum(1)?.unsqueeze(1)?.to_dtype(sum.dtype())?;
    l2_normalize(&sum.broadcast_div(&lengths)?)
}

/// Row-wise L2 normalization of a `[B,H]` tensor.
pub fn l2_normalize(x: &Tensor) -> Result<Tensor> {
    let eps_val = match x.dtype() { DType::F16 => 1e-6f32, _ => 1e-12f32 };
    let eps = Tensor::new(&[eps_val], x.device())?.to_dtype(x.dtype())?.unsqueeze(0)?;
    let norm = x.sqr()?.sum_keepdim(1)?.sqrt()?.broadcast_add(&eps)?;
    Ok(x.broadcast_div(&norm)?)
}
