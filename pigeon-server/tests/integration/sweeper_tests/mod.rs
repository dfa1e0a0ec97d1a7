mod test_eviction;
