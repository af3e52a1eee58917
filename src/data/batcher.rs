// ============================================================
// Layer 4 — Jet Batcher
// ============================================================
// Bridges the framework-free EventBatch / JetSample types and
// burn tensors.
//
// Two entry points:
//   - EventBatch::to_tensors   → one batch from get_batch()
//   - JetBatcher (Batcher)     → Vec<JetSample> from a burn
//                                DataLoader over JetSamples
//
// Both give the same layout:
//   features: Tensor<B, 3>      [batch, max_len, 9]
//   labels:   Tensor<B, 1, Int> [batch]
//
// Samples are already padded, so batching is just flattening
// and reshaping.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
    tensor::TensorData,
};

use crate::data::dataset::{EventBatch, JetSample};
use crate::data::features::FEATURE_WIDTH;

// ─── JetBatch ─────────────────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct JetBatch<B: Backend> {
    /// Padded track features — shape: [batch_size, max_len, 9]
    pub features: Tensor<B, 3>,

    /// Binary jet class — shape: [batch_size]
    pub labels: Tensor<B, 1, Int>,
}

impl EventBatch {
    /// Copy this batch onto `device`
    pub fn to_tensors<B: Backend>(&self, device: &B::Device) -> JetBatch<B> {
        let features = Tensor::<B, 3>::from_data(
            TensorData::new(self.features.clone(), self.shape()),
            device,
        );
        let labels = Tensor::<B, 1, Int>::from_data(
            TensorData::new(self.labels.clone(), [self.batch_size]),
            device,
        );
        JetBatch { features, labels }
    }
}

// ─── JetBatcher ───────────────────────────────────────────────────────────────
#[derive(Clone, Debug)]
pub struct JetBatcher<B: Backend> {
    pub device:  B::Device,
    /// Must match the max_len the samples were padded to
    pub max_len: usize,
}

impl<B: Backend> JetBatcher<B> {
    pub fn new(device: B::Device, max_len: usize) -> Self {
        Self { device, max_len }
    }
}

impl<B: Backend> Batcher<JetSample, JetBatch<B>> for JetBatcher<B> {
    fn batch(&self, items: Vec<JetSample>) -> JetBatch<B> {
        let batch_size = items.len();

        let features: Vec<f32> = items
            .iter()
            .flat_map(|s| s.features.iter().copied())
            .collect();
        let labels: Vec<i64> = items.iter().map(|s| s.label).collect();

        let batch = EventBatch {
            features,
            labels,
            batch_size,
            max_len: self.max_len,
        };
        assert_eq!(
            batch.features.len(),
            batch_size * self.max_len * FEATURE_WIDTH,
            "sample padded to a different max_len than the batcher"
        );

        batch.to_tensors(&self.device)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use burn::data::dataloader::DataLoaderBuilder;

    use crate::data::dataset::JetDataset;
    use crate::data::source::MemoryEventSource;
    use crate::domain::config::DatasetConfig;
    use crate::domain::event::EventRecord;

    type TestBackend = NdArray;

    fn sample(value: f32, label: i64, max_len: usize) -> JetSample {
        JetSample { features: vec![value; max_len * FEATURE_WIDTH], label }
    }

    #[test]
    fn test_event_batch_to_tensors_shapes() {
        let batch = EventBatch {
            features:   vec![0.5; 2 * 10 * FEATURE_WIDTH],
            labels:     vec![0, 1],
            batch_size: 2,
            max_len:    10,
        };
        let device  = Default::default();
        let tensors = batch.to_tensors::<TestBackend>(&device);

        assert_eq!(tensors.features.dims(), [2, 10, FEATURE_WIDTH]);
        assert_eq!(tensors.labels.dims(), [2]);
    }

    #[test]
    fn test_batcher_keeps_sample_order() {
        let batcher = JetBatcher::<TestBackend>::new(Default::default(), 3);
        let out     = batcher.batch(vec![sample(1.0, 0, 3), sample(2.0, 1, 3)]);

        assert_eq!(out.features.dims(), [2, 3, FEATURE_WIDTH]);

        let values: Vec<f32> = out.features.into_data().to_vec().unwrap();
        assert_eq!(values[0], 1.0);
        assert_eq!(values[3 * FEATURE_WIDTH], 2.0);

        let labels: Vec<i64> = out.labels.into_data().convert::<i64>().to_vec().unwrap();
        assert_eq!(labels, vec![0, 1]);
    }

    #[test]
    #[should_panic(expected = "different max_len")]
    fn test_batcher_rejects_mismatched_padding() {
        let batcher = JetBatcher::<TestBackend>::new(Default::default(), 3);
        let _ = batcher.batch(vec![sample(1.0, 0, 4)]);
    }

    #[test]
    fn test_dataloader_over_samples() {
        let records: Vec<EventRecord> = (0..5)
            .map(|i| EventRecord {
                track_pt:         vec![i as f32],
                track_deta:       vec![0.0],
                track_dphi:       vec![0.0],
                track_dz:         vec![0.0],
                track_errd0:      vec![0.0],
                track_charge:     vec![0.0],
                track_costomp_id: vec![2],
                jet_label:        4,
            })
            .collect();
        let cfg = DatasetConfig { batch_size: 2, max_len: 4, ..Default::default() };
        let ds  = JetDataset::new(MemoryEventSource::new("mem", records), &cfg).unwrap();

        let batcher = JetBatcher::<TestBackend>::new(Default::default(), cfg.max_len);
        let loader  = DataLoaderBuilder::new(batcher)
            .batch_size(cfg.batch_size)
            .build(ds.into_samples().unwrap());

        let batches: Vec<JetBatch<TestBackend>> = loader.iter().collect();
        // 5 entries, batch size 2 → the fifth is never loaded
        assert_eq!(batches.len(), 2);
        for b in &batches {
            assert_eq!(b.features.dims(), [2, 4, FEATURE_WIDTH]);
        }
    }
}
